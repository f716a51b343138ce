use little_chat_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// How a scripted request fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetFailure {
    /// The request never reaches the server.
    Transport,
    /// The server answers with an error status.
    Status,
    /// The server answers with something that is not a reply.
    MalformedReply,
}

impl From<PresetFailure> for ErrorKind {
    #[inline]
    fn from(failure: PresetFailure) -> Self {
        match failure {
            PresetFailure::Transport => ErrorKind::Transport,
            PresetFailure::Status => ErrorKind::Status,
            PresetFailure::MalformedReply => ErrorKind::MalformedReply,
        }
    }
}

/// The preset outcome of one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// The request succeeds with this text.
    #[serde(rename = "text")]
    Text(String),
    /// The request fails.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

impl PresetReply {
    /// Creates a successful reply.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        PresetReply::Text(text.into())
    }

    /// Creates a failed reply.
    #[inline]
    pub fn failure(failure: PresetFailure) -> Self {
        PresetReply::Failure(failure)
    }
}
