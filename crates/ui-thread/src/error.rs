use std::error::Error;
use std::fmt;

/// Returned when events or work are handed to a UI thread that has
/// stopped, or when it stops before answering a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiThreadGoneError;

impl fmt::Display for UiThreadGoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the UI thread has stopped")
    }
}

impl Error for UiThreadGoneError {}
