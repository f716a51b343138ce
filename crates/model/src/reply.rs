use serde::{Deserialize, Serialize};

/// A successful reply from the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    text: String,
}

impl ChatReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Returns the reply text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts the reply into its text.
    #[inline]
    pub fn into_text(self) -> String {
        self.text
    }
}
