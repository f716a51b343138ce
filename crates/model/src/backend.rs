use std::error::Error;

use crate::error::ErrorKind;
use crate::reply::ChatReply;
use crate::turn::ChatRequest;

/// The error type for a chat backend.
pub trait ChatBackendError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that produces the next bot reply for a conversation.
///
/// Once the backend is created, it should behave like a stateless object.
/// Every request carries the whole history, so the backend must not rely
/// on having seen earlier requests, and it should be prepared for being
/// dropped anytime.
pub trait ChatBackend: Send + Sync {
    /// The error type that may be returned by the backend.
    type Error: ChatBackendError;

    /// Sends a request to the backend.
    ///
    /// The returned future must not borrow the backend or the request,
    /// since callers usually move it into a spawned task.
    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
