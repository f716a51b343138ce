//! A single-task UI loop with explicit event handler registrations.
//!
//! All state of a widget lives on one UI thread, which is a tokio task
//! that owns the state together with its event handlers. Events and
//! posted work run one by one in the order they were queued. Work that
//! has to wait (network calls, timers) runs elsewhere and posts its
//! result back, so the state never needs a lock.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod handlers;
mod runner;

pub use error::UiThreadGoneError;
pub use handle::UiThread;
pub use handlers::Handlers;
