use little_chat_ui_thread::Handlers;

use super::WidgetState;
use crate::event::{ElementId, Key, UiEvent};

/// Wires the widget's behavior to the UI events it reacts to.
pub(super) fn register(handlers: &mut Handlers<WidgetState, UiEvent>) {
    handlers
        .on(
            |event| *event == UiEvent::Click(ElementId::SendButton),
            |state, _, ui| state.send_message(None, ui),
        )
        .on(
            |event| {
                matches!(
                    event,
                    UiEvent::KeyPress {
                        target: ElementId::InputField,
                        ..
                    }
                )
            },
            |state, event, ui| {
                let UiEvent::KeyPress { key, shift, .. } = event else {
                    return;
                };
                match key {
                    Key::Enter if !*shift => state.send_message(None, ui),
                    Key::Enter => state.input.append("\n"),
                    Key::Char(ch) => {
                        state.input.append(ch.encode_utf8(&mut [0; 4]))
                    }
                }
            },
        )
        .on(
            |event| {
                matches!(
                    event,
                    UiEvent::Input {
                        target: ElementId::InputField,
                        ..
                    }
                )
            },
            |state, event, _| {
                if let UiEvent::Input { value, .. } = event {
                    state.input.set_value(value.as_str());
                }
            },
        )
        .on(
            |event| *event == UiEvent::Click(ElementId::InputField),
            |state, _, _| state.input.focus(),
        )
        .on(
            |event| *event == UiEvent::Click(ElementId::EmojiToggle),
            |state, _, _| state.emoji_picker.toggle(),
        )
        // Any click outside the picker and its toggle dismisses it.
        .on(
            |event| match event {
                UiEvent::Click(target) => {
                    *target != ElementId::EmojiToggle
                        && !target.is_within_emoji_picker()
                }
                _ => false,
            },
            |state, _, _| state.emoji_picker.hide(),
        )
        .on(
            |event| matches!(event, UiEvent::Click(ElementId::EmojiItem(_))),
            |state, event, _| {
                if let UiEvent::Click(ElementId::EmojiItem(idx)) = event {
                    state.select_emoji(*idx);
                }
            },
        )
        .on(
            |event| matches!(event, UiEvent::Click(ElementId::QuickReply(_))),
            |state, event, ui| {
                if let UiEvent::Click(ElementId::QuickReply(idx)) = event {
                    state.click_quick_reply(*idx, ui);
                }
            },
        );
}
