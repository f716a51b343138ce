use little_chat_core::display::ChatDisplay;
use little_chat_core::event::{ElementId, UiEvent};
use little_chat_core::input::QuickReply;
use little_chat_core::{ChatWidget, ChatWidgetBuilder, Stage, UiThreadGoneError};
use little_chat_model::ChatBackend;

use crate::command::Command;

/// Glyphs offered by the emoji picker unless configured otherwise.
pub const DEFAULT_EMOJIS: &[&str] = &[
    "😀", "😂", "😊", "😍", "🤔", "👍", "🙏", "👋", "🎉", "❤️", "🌴", "🍹",
];

/// Quick replies offered unless configured otherwise.
pub fn default_quick_replies() -> Vec<QuickReply> {
    vec![
        QuickReply::new("🍳 Menu", "Can I see the menu?"),
        QuickReply::new("🛏️ Rooms", "Do you have any rooms available?"),
        QuickReply::new("🧹 Room service", "I'd like to request room service."),
        QuickReply::new("🏊 Facilities", "What facilities do you have?"),
    ]
}

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    widget_builder: ChatWidgetBuilder,
    emojis: Vec<String>,
    quick_replies: Vec<QuickReply>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified backend, the default
    /// emojis and the default quick replies.
    pub fn with_backend<B: ChatBackend + 'static>(backend: B) -> Self {
        Self {
            widget_builder: ChatWidgetBuilder::with_backend(backend),
            emojis: DEFAULT_EMOJIS.iter().map(|&e| e.to_owned()).collect(),
            quick_replies: default_quick_replies(),
        }
    }

    /// Sets the display that messages are drawn into.
    #[inline]
    pub fn with_display(mut self, display: impl ChatDisplay + 'static) -> Self {
        self.widget_builder = self.widget_builder.with_display(display);
        self
    }

    /// Replaces the glyphs offered by the emoji picker.
    pub fn with_emojis<I, S>(mut self, emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emojis = emojis.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the quick replies.
    #[inline]
    pub fn with_quick_replies(
        mut self,
        quick_replies: impl IntoIterator<Item = QuickReply>,
    ) -> Self {
        self.quick_replies = quick_replies.into_iter().collect();
        self
    }

    /// Attaches a callback to be invoked when the last outstanding reply
    /// has been handled.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.widget_builder = self.widget_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let SessionBuilder {
            mut widget_builder,
            emojis,
            quick_replies,
        } = self;

        widget_builder = widget_builder.with_emojis(emojis.iter().cloned());
        for reply in &quick_replies {
            widget_builder = widget_builder.with_quick_reply(reply.clone());
        }

        Session {
            widget: widget_builder.build(),
            emojis,
            quick_replies,
        }
    }
}

/// A chat session, like a window that displays messages and has an input
/// box, driven by terminal commands.
///
/// The session holds a fully configured widget that you can use directly,
/// and it is basically a wrapper around [`ChatWidget`].
pub struct Session {
    widget: ChatWidget,
    emojis: Vec<String>,
    quick_replies: Vec<QuickReply>,
}

impl Session {
    /// Returns the underlying widget.
    #[inline]
    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    /// Returns the glyphs offered by the emoji picker.
    #[inline]
    pub fn emojis(&self) -> &[String] {
        &self.emojis
    }

    /// Returns the quick replies.
    #[inline]
    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    /// Types `message` after whatever is in the input field, then presses
    /// Enter.
    pub async fn send_message(
        &self,
        message: &str,
    ) -> Result<(), UiThreadGoneError> {
        let mut value = self.widget.input_value().await?;
        value.push_str(message);
        self.widget.dispatch(UiEvent::input(value))?;
        self.widget.dispatch(UiEvent::enter(false))
    }

    /// Applies a command to the widget and returns the stage it leaves
    /// the widget in.
    ///
    /// Commands that only show information don't touch the widget.
    pub async fn apply(
        &self,
        command: &Command,
    ) -> Result<Stage, UiThreadGoneError> {
        match command {
            Command::Say(text) => self.send_message(text).await?,
            Command::Send => {
                self.widget.dispatch(UiEvent::click(ElementId::SendButton))?
            }
            Command::ToggleEmojis => {
                self.widget.dispatch(UiEvent::click(ElementId::EmojiToggle))?
            }
            Command::PickEmoji(idx) => {
                // Items can only be clicked while the picker is open.
                if !self.widget.is_emoji_picker_visible().await? {
                    self.widget
                        .dispatch(UiEvent::click(ElementId::EmojiToggle))?;
                }
                self.widget
                    .dispatch(UiEvent::click(ElementId::EmojiItem(*idx)))?;
            }
            Command::QuickReply(idx) => {
                self.widget
                    .dispatch(UiEvent::click(ElementId::QuickReply(*idx)))?
            }
            Command::QuickReplies | Command::Help | Command::Quit => {}
        }
        self.widget.stage().await
    }
}
