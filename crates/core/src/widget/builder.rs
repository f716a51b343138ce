use little_chat_model::ChatBackend;

use super::ChatWidget;
use crate::backend_client::BackendClient;
use crate::display::{ChatDisplay, Clock, LocalClock, Panel};
use crate::input::QuickReply;

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    pub(super) backend: BackendClient,
    pub(super) display: Box<dyn ChatDisplay>,
    pub(super) clock: Box<dyn Clock>,
    pub(super) emojis: Vec<String>,
    pub(super) quick_replies: Vec<QuickReply>,
    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatWidgetBuilder {
    /// Creates a new builder with the specified backend.
    ///
    /// Unless configured otherwise, messages go to an in-memory
    /// [`Panel`] and are stamped with the local time.
    #[inline]
    pub fn with_backend<B: ChatBackend + 'static>(backend: B) -> Self {
        Self {
            backend: BackendClient::new(backend),
            display: Box::new(Panel::with_typing_indicator()),
            clock: Box::new(LocalClock),
            emojis: vec![],
            quick_replies: vec![],
            on_idle: None,
        }
    }

    /// Sets the display that messages are drawn into.
    #[inline]
    pub fn with_display(mut self, display: impl ChatDisplay + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    /// Sets the clock used for message timestamps.
    #[inline]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Sets the glyphs offered by the emoji picker.
    pub fn with_emojis<I, S>(mut self, emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emojis = emojis.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a quick-reply button.
    #[inline]
    pub fn with_quick_reply(mut self, reply: QuickReply) -> Self {
        self.quick_replies.push(reply);
        self
    }

    /// Attaches a callback to be invoked when the last outstanding reply
    /// has been handled.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the widget and starts its UI thread.
    ///
    /// This must be called within a tokio runtime.
    #[inline]
    pub fn build(self) -> ChatWidget {
        ChatWidget::spawn_from_builder(self)
    }
}
