//! Rendering messages into the chat panel.
//!
//! Rendering is split in two: [`render_message`] turns a piece of text into
//! a [`MessageBubble`] without touching any UI, and a [`ChatDisplay`] puts
//! bubbles on screen. [`Panel`] is an in-memory display that keeps the
//! layout rules of the message panel, for hosts that draw it themselves
//! and for tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveTime};

/// Who a bubble is drawn for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The person typing into the widget.
    User,
    /// The bot, including the fallback message shown on failures.
    Bot,
}

impl Speaker {
    /// Returns the avatar glyph for this speaker.
    #[inline]
    pub fn avatar(self) -> &'static str {
        match self {
            Speaker::User => "👤",
            Speaker::Bot => "🤖",
        }
    }
}

/// A source of wall-clock time for timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current local time of day.
    fn now(&self) -> NaiveTime;
}

/// The system clock in the local time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    #[inline]
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that is stuck at one time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Formats a time of day as zero-padded `HH:MM`.
#[inline]
pub fn format_timestamp(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// A rendered chat message.
///
/// The text is kept verbatim. Whitespace and line breaks are significant
/// and nothing in it is interpreted as markup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageBubble {
    speaker: Speaker,
    text: String,
    timestamp: String,
}

impl MessageBubble {
    /// Returns who the bubble is drawn for.
    #[inline]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the avatar glyph.
    #[inline]
    pub fn avatar(&self) -> &'static str {
        self.speaker.avatar()
    }

    /// Returns the message text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the `HH:MM` timestamp.
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Renders a message for `speaker`, stamped with the current time of
/// `clock`.
pub fn render_message(
    content: &str,
    speaker: Speaker,
    clock: &dyn Clock,
) -> MessageBubble {
    MessageBubble {
        speaker,
        text: content.to_owned(),
        timestamp: format_timestamp(clock.now()),
    }
}

/// A message panel that bubbles can be drawn into.
///
/// All methods are called from the UI thread, in the order the
/// conversation controller decides.
pub trait ChatDisplay: Send {
    /// Inserts a message. It goes right before the typing indicator if
    /// the panel has one, otherwise at the end.
    fn insert_message(&mut self, bubble: MessageBubble);

    /// Shows or hides the typing indicator.
    fn set_typing_visible(&mut self, visible: bool);

    /// Scrolls the panel to its bottom.
    fn scroll_to_bottom(&mut self);
}

impl<D: ChatDisplay + ?Sized> ChatDisplay for Box<D> {
    #[inline]
    fn insert_message(&mut self, bubble: MessageBubble) {
        (**self).insert_message(bubble)
    }

    #[inline]
    fn set_typing_visible(&mut self, visible: bool) {
        (**self).set_typing_visible(visible)
    }

    #[inline]
    fn scroll_to_bottom(&mut self) {
        (**self).scroll_to_bottom()
    }
}

/// A child element of a [`Panel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelChild {
    /// A message bubble.
    Message(MessageBubble),
    /// The typing indicator element. It is always present in the panel
    /// that owns one, visible or not.
    TypingIndicator,
}

/// An in-memory message panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    children: Vec<PanelChild>,
    typing_visible: bool,
    scroll_offset: usize,
}

impl Panel {
    /// Creates a panel without a typing indicator element.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a panel whose last child is a hidden typing indicator.
    #[inline]
    pub fn with_typing_indicator() -> Self {
        Self {
            children: vec![PanelChild::TypingIndicator],
            ..Default::default()
        }
    }

    /// Returns the children in display order.
    #[inline]
    pub fn children(&self) -> &[PanelChild] {
        &self.children
    }

    /// Iterates over the message bubbles in display order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageBubble> {
        self.children.iter().filter_map(|child| match child {
            PanelChild::Message(bubble) => Some(bubble),
            PanelChild::TypingIndicator => None,
        })
    }

    /// Returns `true` if the typing indicator is shown.
    #[inline]
    pub fn is_typing_visible(&self) -> bool {
        self.typing_visible
    }

    /// Returns the height of the scrollable content, counted in visible
    /// children.
    pub fn scroll_height(&self) -> usize {
        self.children
            .iter()
            .filter(|child| match child {
                PanelChild::Message(_) => true,
                PanelChild::TypingIndicator => self.typing_visible,
            })
            .count()
    }

    /// Returns `true` if the panel is scrolled all the way down.
    #[inline]
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_offset >= self.scroll_height()
    }
}

impl ChatDisplay for Panel {
    fn insert_message(&mut self, bubble: MessageBubble) {
        let indicator = self
            .children
            .iter()
            .position(|child| *child == PanelChild::TypingIndicator);
        match indicator {
            Some(idx) => self.children.insert(idx, PanelChild::Message(bubble)),
            None => self.children.push(PanelChild::Message(bubble)),
        }
    }

    #[inline]
    fn set_typing_visible(&mut self, visible: bool) {
        self.typing_visible = visible;
    }

    #[inline]
    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.scroll_height();
    }
}

/// A [`Panel`] that can be read from outside the UI thread.
///
/// The widget is the only writer; the lock is only there so that a host
/// or a test can look at the panel while the widget owns it.
#[derive(Clone, Debug, Default)]
pub struct SharedPanel(Arc<Mutex<Panel>>);

impl SharedPanel {
    /// Wraps a panel.
    #[inline]
    pub fn new(panel: Panel) -> Self {
        Self(Arc::new(Mutex::new(panel)))
    }

    /// Returns a copy of the panel as it is now.
    #[inline]
    pub fn snapshot(&self) -> Panel {
        self.lock().clone()
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Panel> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatDisplay for SharedPanel {
    #[inline]
    fn insert_message(&mut self, bubble: MessageBubble) {
        self.lock().insert_message(bubble);
    }

    #[inline]
    fn set_typing_visible(&mut self, visible: bool) {
        self.lock().set_typing_visible(visible);
    }

    #[inline]
    fn scroll_to_bottom(&mut self) {
        self.lock().scroll_to_bottom();
    }
}
