use little_chat_model::{ChatRequest, Turn};
use super::{FALLBACK_REPLY, Ui, WidgetState};
use crate::backend_client::SendRequestResult;
use crate::display::{Speaker, render_message};

/// The stage of the send cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing typed, nothing in flight.
    #[default]
    Idle,
    /// The input field holds text that can be sent.
    Composing,
    /// At least one request is waiting for its reply.
    Sending,
}

impl WidgetState {
    pub(super) fn stage(&self) -> Stage {
        if self.in_flight > 0 {
            Stage::Sending
        } else if self.input.trimmed().is_some() {
            Stage::Composing
        } else {
            Stage::Idle
        }
    }

    /// Picks the text to send and where it came from.
    fn resolve_text(&self, text: Option<String>) -> Option<(String, Source)> {
        match text {
            Some(text) if !text.is_empty() => Some((text, Source::Provided)),
            _ => self
                .input
                .trimmed()
                .map(|text| (text.to_owned(), Source::InputField)),
        }
    }

    pub(super) fn send_message(
        &mut self,
        text: Option<String>,
        ui: &Ui,
    ) {
        let Some((text, source)) = self.resolve_text(text) else {
            trace!("nothing to send");
            return;
        };

        self.render(&text, Speaker::User);
        if source == Source::InputField {
            self.input.clear();
        }
        self.transcript.append(Turn::user(text));
        self.set_typing_visible(true);

        let request = ChatRequest {
            history: self.transcript.snapshot(),
        };
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight += 1;
        debug!(request_id, turns = request.history.len(), "sending a request");

        let backend = self.backend.clone();
        let ui = ui.clone();
        tokio::spawn(async move {
            let result = backend.send_request(request).await;
            // The widget may have been closed in the meantime.
            ui.post(move |state, _| state.finish_request(request_id, result))
                .ok();
        });
    }

    fn finish_request(&mut self, request_id: u64, result: SendRequestResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.set_typing_visible(false);

        match result {
            Ok(reply) => {
                debug!(request_id, "got a reply");
                let text = reply.into_text();
                self.render(&text, Speaker::Bot);
                self.transcript.append(Turn::assistant(text));
            }
            Err(err) => {
                // Nothing is recorded for this turn, a later send carries
                // the unanswered user turn again.
                warn!(request_id, "reply unavailable: {err}");
                self.render(FALLBACK_REPLY, Speaker::Bot);
            }
        }

        if self.in_flight == 0 {
            if let Some(on_idle) = &self.on_idle {
                on_idle();
            }
        }
    }

    pub(super) fn select_emoji(&mut self, idx: usize) {
        if !self.emoji_picker.is_visible() {
            trace!("emoji picker is hidden, ignoring item {idx}");
            return;
        }
        let Some(glyph) = self.emoji_picker.glyph(idx) else {
            warn!("no emoji item at {idx}");
            return;
        };
        self.input.append(glyph);
        self.input.focus();
        self.emoji_picker.hide();
    }

    pub(super) fn click_quick_reply(&mut self, idx: usize, ui: &Ui) {
        let Some(reply) = self.quick_replies.get(idx) else {
            warn!("no quick reply at {idx}");
            return;
        };
        let text = reply.text().to_owned();
        self.send_message(Some(text), ui);
    }

    fn render(&mut self, content: &str, speaker: Speaker) {
        let bubble = render_message(content, speaker, self.clock.as_ref());
        self.display.insert_message(bubble);
        self.display.scroll_to_bottom();
    }

    fn set_typing_visible(&mut self, visible: bool) {
        self.typing_visible = visible;
        self.display.set_typing_visible(visible);
        self.display.scroll_to_bottom();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Provided,
    InputField,
}
