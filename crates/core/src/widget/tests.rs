use std::time::Duration;

use chrono::NaiveTime;
use little_chat_model::{Role, Turn};
use little_chat_test_backend::{PresetFailure, PresetReply, ScriptedBackend};
use tokio::sync::watch;
use tokio::time::timeout;

use crate::display::{FixedClock, MessageBubble, Panel, SharedPanel, Speaker};
use crate::event::{ElementId, Key, UiEvent};
use crate::input::QuickReply;
use crate::{ChatWidget, ChatWidgetBuilder, FALLBACK_REPLY, Stage};

struct Harness {
    widget: ChatWidget,
    panel: SharedPanel,
    backend: ScriptedBackend,
    idle_rx: watch::Receiver<usize>,
}

impl Harness {
    fn new() -> Self {
        let backend = ScriptedBackend::default();
        let panel = SharedPanel::new(Panel::with_typing_indicator());
        let (idle_tx, idle_rx) = watch::channel(0);

        let widget = ChatWidgetBuilder::with_backend(backend.clone())
            .with_display(panel.clone())
            .with_clock(FixedClock(NaiveTime::from_hms_opt(14, 7, 0).unwrap()))
            .with_emojis(["😀", "👍"])
            .with_quick_reply(QuickReply::new("🍳 Menu", "Show me the menu"))
            .on_idle(move || {
                idle_tx.send_modify(|count| *count += 1);
            })
            .build();

        Self {
            widget,
            panel,
            backend,
            idle_rx,
        }
    }

    fn type_and_enter(&self, text: &str) {
        self.widget.dispatch(UiEvent::input(text)).unwrap();
        self.widget.dispatch(UiEvent::enter(false)).unwrap();
    }

    async fn wait_idle(&mut self, times: usize) {
        timeout(
            Duration::from_millis(500),
            self.idle_rx.wait_for(|count| *count >= times),
        )
        .await
        .unwrap()
        .unwrap();
    }

    /// Waits until everything dispatched so far has been handled.
    async fn settle(&self) {
        self.widget.transcript().await.unwrap();
    }

    fn bubbles(&self) -> Vec<(Speaker, String)> {
        self.panel
            .snapshot()
            .messages()
            .map(|bubble| (bubble.speaker(), bubble.text().to_owned()))
            .collect()
    }
}

#[tokio::test]
async fn test_simple_exchange() {
    let mut harness = Harness::new();
    harness
        .backend
        .add_reply(PresetReply::text("Hi! How can I help?"));

    harness.type_and_enter("Hello");
    harness.wait_idle(1).await;

    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![Turn::user("Hello"), Turn::assistant("Hi! How can I help?")]
    );
    assert_eq!(
        harness.bubbles(),
        vec![
            (Speaker::User, "Hello".to_owned()),
            (Speaker::Bot, "Hi! How can I help?".to_owned()),
        ]
    );

    let panel = harness.panel.snapshot();
    assert!(panel.messages().all(|bubble| bubble.timestamp() == "14:07"));
    assert!(!panel.is_typing_visible());
    assert!(panel.is_scrolled_to_bottom());

    let requests = harness.backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].history, vec![Turn::user("Hello")]);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let harness = Harness::new();

    harness.type_and_enter("   \n ");
    harness.widget.send_message(None).unwrap();
    harness.widget.send_message(Some(String::new())).unwrap();
    harness.settle().await;

    assert!(harness.widget.transcript().await.unwrap().is_empty());
    assert!(harness.bubbles().is_empty());
    assert!(!harness.widget.is_typing_visible().await.unwrap());
    assert!(harness.backend.requests().is_empty());
    // The field is not cleared when nothing is sent.
    assert_eq!(harness.widget.input_value().await.unwrap(), "   \n ");
}

#[tokio::test]
async fn test_typing_indicator_while_waiting() {
    let mut harness = Harness::new();
    harness.backend.add_reply(PresetReply::text("Done"));
    harness.backend.hold();

    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Idle);
    harness.widget.dispatch(UiEvent::input("  Hello  ")).unwrap();
    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Composing);
    harness.widget.dispatch(UiEvent::enter(false)).unwrap();
    harness.backend.wait_for_requests(1).await;

    // The user turn is recorded right away, before the reply arrives.
    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![Turn::user("Hello")]
    );
    assert_eq!(harness.bubbles(), vec![(Speaker::User, "Hello".to_owned())]);
    assert_eq!(harness.widget.input_value().await.unwrap(), "");
    assert!(harness.widget.is_typing_visible().await.unwrap());
    assert!(harness.panel.snapshot().is_typing_visible());
    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Sending);

    harness.backend.release();
    harness.wait_idle(1).await;

    assert!(!harness.widget.is_typing_visible().await.unwrap());
    assert!(!harness.panel.snapshot().is_typing_visible());
    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Idle);
}

#[tokio::test]
async fn test_typing_indicator_for_slow_failure() {
    let mut harness = Harness::new();
    harness
        .backend
        .add_reply(PresetReply::failure(PresetFailure::Transport));
    harness.backend.set_delay(Duration::from_millis(50));

    harness.type_and_enter("Anyone there?");
    assert!(harness.widget.is_typing_visible().await.unwrap());
    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Sending);

    harness.wait_idle(1).await;
    assert!(!harness.widget.is_typing_visible().await.unwrap());
    assert_eq!(harness.bubbles().len(), 2);
}

#[tokio::test]
async fn test_failure_renders_fallback() {
    let mut harness = Harness::new();
    harness
        .backend
        .add_reply(PresetReply::failure(PresetFailure::Transport));
    harness.backend.hold();

    harness.widget.dispatch(UiEvent::input("Hello")).unwrap();
    harness
        .widget
        .dispatch(UiEvent::click(ElementId::SendButton))
        .unwrap();
    harness.backend.wait_for_requests(1).await;
    assert!(harness.widget.is_typing_visible().await.unwrap());

    harness.backend.release();
    harness.wait_idle(1).await;

    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![Turn::user("Hello")]
    );
    assert_eq!(
        harness.bubbles(),
        vec![
            (Speaker::User, "Hello".to_owned()),
            (Speaker::Bot, FALLBACK_REPLY.to_owned()),
        ]
    );
    assert!(!harness.widget.is_typing_visible().await.unwrap());
}

#[tokio::test]
async fn test_malformed_reply_is_a_failure() {
    let mut harness = Harness::new();
    harness
        .backend
        .add_reply(PresetReply::failure(PresetFailure::MalformedReply));

    harness.type_and_enter("Hello");
    harness.wait_idle(1).await;

    assert_eq!(harness.widget.transcript().await.unwrap().len(), 1);
    let panel = harness.panel.snapshot();
    let last = panel.messages().last().map(MessageBubble::text);
    assert_eq!(last, Some(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_retry_resends_unanswered_turn() {
    let mut harness = Harness::new();
    harness
        .backend
        .add_reply(PresetReply::failure(PresetFailure::Status));
    harness.backend.add_reply(PresetReply::text("Now I hear you"));

    harness.type_and_enter("Hello");
    harness.wait_idle(1).await;
    harness.type_and_enter("Hello?");
    harness.wait_idle(2).await;

    let requests = harness.backend.requests();
    assert_eq!(requests[1].history, vec![
        Turn::user("Hello"),
        Turn::user("Hello?")
    ]);
    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![
            Turn::user("Hello"),
            Turn::user("Hello?"),
            Turn::assistant("Now I hear you"),
        ]
    );
    assert_eq!(harness.bubbles().len(), 4);
}

#[tokio::test]
async fn test_requests_carry_transcript_prefix() {
    let mut harness = Harness::new();
    for reply in ["one", "two", "three"] {
        harness.backend.add_reply(PresetReply::text(reply));
    }

    for (idx, input) in ["a", "b", "c"].into_iter().enumerate() {
        harness.type_and_enter(input);
        harness.wait_idle(idx + 1).await;
    }

    let transcript = harness.widget.transcript().await.unwrap();
    assert_eq!(transcript.len(), 6);
    for request in harness.backend.requests() {
        let len = request.history.len();
        assert_eq!(request.history[..], transcript[..len]);
        assert_eq!(request.history[len - 1].role(), Role::User);
    }
}

#[tokio::test]
async fn test_overlapping_sends() {
    let mut harness = Harness::new();
    harness.backend.add_reply(PresetReply::text("reply a"));
    harness.backend.add_reply(PresetReply::text("reply b"));
    harness.backend.hold();

    harness.type_and_enter("a");
    harness.type_and_enter("b");
    harness.backend.wait_for_requests(2).await;

    let requests = harness.backend.requests();
    assert_eq!(requests[0].history, vec![Turn::user("a")]);
    assert_eq!(requests[1].history, vec![Turn::user("a"), Turn::user("b")]);

    harness.backend.release();
    harness.wait_idle(1).await;

    // Replies are recorded in arrival order, which is not guaranteed.
    let transcript = harness.widget.transcript().await.unwrap();
    assert_eq!(transcript.len(), 4);
    assert_eq!(&transcript[..2], &[Turn::user("a"), Turn::user("b")]);
    let mut replies: Vec<_> =
        transcript[2..].iter().map(|turn| turn.content()).collect();
    replies.sort();
    assert_eq!(replies, ["reply a", "reply b"]);
    assert!(!harness.widget.is_typing_visible().await.unwrap());
}

#[tokio::test]
async fn test_emoji_selection() {
    let harness = Harness::new();

    harness.widget.dispatch(UiEvent::input("Thanks ")).unwrap();
    harness
        .widget
        .dispatch(UiEvent::click(ElementId::EmojiToggle))
        .unwrap();
    assert!(harness.widget.is_emoji_picker_visible().await.unwrap());

    harness
        .widget
        .dispatch(UiEvent::click(ElementId::EmojiItem(1)))
        .unwrap();
    assert_eq!(harness.widget.input_value().await.unwrap(), "Thanks 👍");
    assert!(harness.widget.is_input_focused().await.unwrap());
    assert!(!harness.widget.is_emoji_picker_visible().await.unwrap());

    // Items of a hidden picker cannot be clicked.
    harness
        .widget
        .dispatch(UiEvent::click(ElementId::EmojiItem(0)))
        .unwrap();
    assert_eq!(harness.widget.input_value().await.unwrap(), "Thanks 👍");

    assert!(harness.widget.transcript().await.unwrap().is_empty());
    assert!(harness.backend.requests().is_empty());
}

#[tokio::test]
async fn test_emoji_picker_dismissal() {
    let harness = Harness::new();
    let widget = &harness.widget;

    widget.dispatch(UiEvent::click(ElementId::EmojiToggle)).unwrap();
    widget.dispatch(UiEvent::click(ElementId::EmojiPicker)).unwrap();
    assert!(widget.is_emoji_picker_visible().await.unwrap());

    widget.dispatch(UiEvent::click(ElementId::MessagePanel)).unwrap();
    assert!(!widget.is_emoji_picker_visible().await.unwrap());

    widget.dispatch(UiEvent::click(ElementId::EmojiToggle)).unwrap();
    widget.dispatch(UiEvent::click(ElementId::Document)).unwrap();
    assert!(!widget.is_emoji_picker_visible().await.unwrap());

    widget.dispatch(UiEvent::click(ElementId::EmojiToggle)).unwrap();
    widget.dispatch(UiEvent::click(ElementId::EmojiToggle)).unwrap();
    assert!(!widget.is_emoji_picker_visible().await.unwrap());
}

#[tokio::test]
async fn test_quick_reply() {
    let mut harness = Harness::new();
    harness.backend.add_reply(PresetReply::text("Here it is"));

    harness.widget.dispatch(UiEvent::input("unrelated")).unwrap();
    harness
        .widget
        .dispatch(UiEvent::click(ElementId::QuickReply(0)))
        .unwrap();
    harness.wait_idle(1).await;

    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![Turn::user("Show me the menu"), Turn::assistant("Here it is")]
    );
    assert_eq!(harness.widget.input_value().await.unwrap(), "unrelated");

    // Unknown buttons do nothing.
    harness
        .widget
        .dispatch(UiEvent::click(ElementId::QuickReply(7)))
        .unwrap();
    assert_eq!(harness.widget.transcript().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_quick_reply_keeps_draft() {
    let mut harness = Harness::new();
    harness.backend.add_reply(PresetReply::text("Sure"));
    harness.backend.add_reply(PresetReply::text("Got it"));

    harness.widget.dispatch(UiEvent::input("half a tho")).unwrap();
    harness.widget.send_message(Some("Book a table".to_owned())).unwrap();
    harness.wait_idle(1).await;
    assert_eq!(harness.widget.input_value().await.unwrap(), "half a tho");
    assert_eq!(harness.widget.stage().await.unwrap(), Stage::Composing);

    // Sending the draft itself still clears the field.
    harness.widget.dispatch(UiEvent::enter(false)).unwrap();
    harness.wait_idle(2).await;
    assert_eq!(harness.widget.input_value().await.unwrap(), "");
    assert_eq!(
        harness.widget.transcript().await.unwrap(),
        vec![
            Turn::user("Book a table"),
            Turn::assistant("Sure"),
            Turn::user("half a tho"),
            Turn::assistant("Got it"),
        ]
    );
}

#[tokio::test]
async fn test_provided_text_is_sent_verbatim() {
    let mut harness = Harness::new();
    harness.backend.add_reply(PresetReply::text("ok"));
    harness.backend.add_reply(PresetReply::text("ok again"));

    harness.widget.send_message(Some(" spaced ".to_owned())).unwrap();
    harness.wait_idle(1).await;

    // An empty text falls back to the trimmed field value.
    harness.widget.dispatch(UiEvent::input("  from the field ")).unwrap();
    harness.widget.send_message(Some(String::new())).unwrap();
    harness.wait_idle(2).await;

    let requests = harness.backend.requests();
    assert_eq!(requests[0].history, vec![Turn::user(" spaced ")]);
    assert_eq!(requests[1].history.last(), Some(&Turn::user("from the field")));
    assert_eq!(harness.widget.input_value().await.unwrap(), "");
}

#[tokio::test]
async fn test_shift_enter_inserts_newline() {
    let harness = Harness::new();
    let widget = &harness.widget;

    widget.dispatch(UiEvent::input("line one")).unwrap();
    widget.dispatch(UiEvent::enter(true)).unwrap();
    widget
        .dispatch(UiEvent::KeyPress {
            target: ElementId::InputField,
            key: Key::Char('x'),
            shift: false,
        })
        .unwrap();

    assert_eq!(widget.input_value().await.unwrap(), "line one\nx");
    assert!(harness.backend.requests().is_empty());
    assert!(harness.bubbles().is_empty());
}

#[tokio::test]
async fn test_input_focused_on_start() {
    let harness = Harness::new();
    assert!(harness.widget.is_input_focused().await.unwrap());
}

#[tokio::test]
async fn test_independent_widgets() {
    let mut first = Harness::new();
    let second = Harness::new();
    first.backend.add_reply(PresetReply::text("Hi"));

    first.type_and_enter("Hello");
    first.wait_idle(1).await;

    assert_eq!(first.widget.transcript().await.unwrap().len(), 2);
    assert!(second.widget.transcript().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_widget() {
    let harness = Harness::new();
    harness.widget.close();
    assert!(harness.widget.transcript().await.is_err());
}
