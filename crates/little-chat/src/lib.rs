//! A terminal chat client assembled from the chat widget and the HTTP
//! backend.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to drive a chat widget from line-based input in your
//! own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod command;
mod session;
#[cfg(feature = "cli")]
mod terminal;

pub use command::{Command, ParseCommandError};
pub use session::{DEFAULT_EMOJIS, Session, SessionBuilder, default_quick_replies};
#[cfg(feature = "cli")]
pub use terminal::TerminalDisplay;

/// Re-exports of [`little_chat_core`] crate.
pub mod core {
    pub use little_chat_core::*;
}
