use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use little_chat_core::display::{ChatDisplay, MessageBubble, Speaker};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// A display that prints messages to a terminal.
///
/// The typing indicator is a spinner on stderr. Bubbles printed while it
/// spins are written around it, so the two never tear each other.
pub struct TerminalDisplay {
    out: Box<dyn Write + Send>,
    spinner_enabled: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalDisplay {
    /// Creates a display printing to stdout, with a spinner as the typing
    /// indicator.
    #[inline]
    pub fn stdout() -> Self {
        Self {
            out: Box::new(io::stdout()),
            spinner_enabled: true,
            spinner: None,
        }
    }

    /// Creates a display printing to `out`, without a spinner.
    #[inline]
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            spinner_enabled: false,
            spinner: None,
        }
    }

    fn write_bubble(&mut self, text: &str) {
        let result = match &self.spinner {
            Some(spinner) => {
                let out = &mut self.out;
                spinner.suspend(|| out.write_all(text.as_bytes()))
            }
            None => self.out.write_all(text.as_bytes()),
        };
        if let Err(err) = result {
            warn!("failed to print a message: {err}");
        }
    }
}

impl ChatDisplay for TerminalDisplay {
    fn insert_message(&mut self, bubble: MessageBubble) {
        let text = format_bubble(&bubble);
        self.write_bubble(&text);
    }

    fn set_typing_visible(&mut self, visible: bool) {
        if !visible {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
            return;
        }
        if !self.spinner_enabled || self.spinner.is_some() {
            return;
        }

        let style = ProgressStyle::with_template("{spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message("🤖 Typing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn scroll_to_bottom(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!("failed to flush the terminal: {err}");
        }
    }
}

/// Formats a bubble as a header line with the avatar and timestamp,
/// followed by the text, every line marked with a colored bar.
fn format_bubble(bubble: &MessageBubble) -> String {
    let bar = match bubble.speaker() {
        Speaker::User => BAR_CHAR.bright_green().to_string(),
        Speaker::Bot => BAR_CHAR.bright_cyan().to_string(),
    };

    let mut text = format!(
        "{bar}{} {}\n",
        bubble.avatar(),
        bubble.timestamp().dimmed()
    );
    // `lines` would drop a trailing empty line, keep the text verbatim.
    for line in bubble.text().split('\n') {
        text.push_str(&format!("{bar}{}\n", line.bright_white()));
    }
    text.push('\n');
    text
}
