use little_chat_model::{ChatReply, ChatRequest, Role, Turn};
use serde::{Deserialize, Serialize};

// ----------------------
// Types sent to the server
// ----------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatPayload {
    history: Vec<Message>,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_payload(req: &ChatRequest) -> ChatPayload {
    ChatPayload {
        history: req.history.iter().map(create_message).collect(),
    }
}

#[inline]
fn create_message(turn: &Turn) -> Message {
    let content = turn.content().to_owned();
    match turn.role() {
        Role::User => Message::User { content },
        Role::Assistant => Message::Assistant { content },
    }
}

#[inline]
pub fn parse_reply(body: &[u8]) -> Result<ChatReply, serde_json::Error> {
    let resp: ChatResponse = serde_json::from_slice(body)?;
    Ok(ChatReply::new(resp.response))
}
