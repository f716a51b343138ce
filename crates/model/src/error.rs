/// The kind of error that occurred while waiting for a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never got a response (connection refused, reset,
    /// timed out, etc.).
    Transport,
    /// The server responded with a non-success status.
    Status,
    /// The server responded successfully, but the body is not a reply.
    MalformedReply,
    /// Any other errors.
    Other,
}
