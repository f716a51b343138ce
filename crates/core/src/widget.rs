mod bindings;
mod builder;
mod state;
#[cfg(test)]
mod tests;

use little_chat_model::Turn;
use little_chat_ui_thread::{Handlers, UiThread, UiThreadGoneError};

use crate::backend_client::BackendClient;
use crate::display::{ChatDisplay, Clock};
use crate::event::UiEvent;
use crate::input::{EmojiPicker, InputField, QuickReply};
use crate::transcript::Transcript;
pub use builder::ChatWidgetBuilder;
pub use state::Stage;

/// The bot message shown when a reply cannot be obtained.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting to the server. Please try again.";

type Ui = UiThread<WidgetState, UiEvent>;

pub(crate) struct WidgetState {
    backend: BackendClient,
    transcript: Transcript,
    display: Box<dyn ChatDisplay>,
    clock: Box<dyn Clock>,
    input: InputField,
    emoji_picker: EmojiPicker,
    quick_replies: Vec<QuickReply>,
    typing_visible: bool,
    in_flight: usize,
    next_request_id: u64,

    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

/// A chat widget, which owns a transcript, a display and the input
/// affordances, and talks to a backend for bot replies.
///
/// The widget state lives on its own UI thread. Events and messages
/// dispatched through this handle are handled in order, one at a time,
/// and queries are answered after everything dispatched before them.
///
/// Sends are not serialized: a message sent while another one is still
/// waiting for its reply goes out immediately with its own copy of the
/// transcript, and the replies are shown in whatever order they arrive.
#[derive(Clone)]
pub struct ChatWidget {
    ui: Ui,
}

impl ChatWidget {
    /// Dispatches a UI event to the registered handlers.
    #[inline]
    pub fn dispatch(&self, event: UiEvent) -> Result<(), UiThreadGoneError> {
        self.ui.dispatch(event)
    }

    /// Sends a message.
    ///
    /// With `Some(text)` the text is sent as is and the input field is
    /// left alone. With `None` (or an empty text) the trimmed value of the
    /// input field is sent and the field is cleared. Nothing happens if
    /// that is empty too.
    #[inline]
    pub fn send_message(
        &self,
        text: Option<String>,
    ) -> Result<(), UiThreadGoneError> {
        self.ui.post(move |state, ui| state.send_message(text, ui))
    }

    /// Returns the turns recorded so far.
    pub async fn transcript(&self) -> Result<Vec<Turn>, UiThreadGoneError> {
        self.ui.query(|state| state.transcript.snapshot()).await
    }

    /// Returns the current value of the input field.
    pub async fn input_value(&self) -> Result<String, UiThreadGoneError> {
        self.ui.query(|state| state.input.value().to_owned()).await
    }

    /// Returns `true` if the input field has keyboard focus.
    pub async fn is_input_focused(&self) -> Result<bool, UiThreadGoneError> {
        self.ui.query(|state| state.input.is_focused()).await
    }

    /// Returns `true` if the typing indicator is shown.
    pub async fn is_typing_visible(&self) -> Result<bool, UiThreadGoneError> {
        self.ui.query(|state| state.typing_visible).await
    }

    /// Returns `true` if the emoji picker is shown.
    pub async fn is_emoji_picker_visible(
        &self,
    ) -> Result<bool, UiThreadGoneError> {
        self.ui.query(|state| state.emoji_picker.is_visible()).await
    }

    /// Returns the stage of the send cycle.
    pub async fn stage(&self) -> Result<Stage, UiThreadGoneError> {
        self.ui.query(WidgetState::stage).await
    }

    /// Stops the UI thread. Replies that arrive afterwards are dropped.
    #[inline]
    pub fn close(&self) {
        self.ui.stop();
    }
}

impl ChatWidget {
    fn spawn_from_builder(builder: ChatWidgetBuilder) -> Self {
        let ChatWidgetBuilder {
            backend,
            display,
            clock,
            emojis,
            quick_replies,
            on_idle,
        } = builder;

        let mut input = InputField::default();
        input.focus();

        let state = WidgetState {
            backend,
            transcript: Default::default(),
            display,
            clock,
            input,
            emoji_picker: EmojiPicker::new(emojis),
            quick_replies,
            typing_visible: false,
            in_flight: 0,
            next_request_id: 1,
            on_idle,
        };

        let mut handlers = Handlers::new();
        bindings::register(&mut handlers);

        Self {
            ui: UiThread::spawn(state, handlers, Some("chat widget")),
        }
    }
}
