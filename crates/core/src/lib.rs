//! Core logic of the chat widget: transcript, conversation controller,
//! message rendering and input affordances.
//!
//! The host UI feeds [`event::UiEvent`]s into a [`ChatWidget`] and
//! supplies a [`display::ChatDisplay`] to draw into. Everything else,
//! including the round trip to the backend, happens inside the widget.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod backend_client;
pub mod display;
pub mod event;
pub mod input;
pub mod transcript;
mod widget;

pub use little_chat_ui_thread::UiThreadGoneError;
pub use widget::{ChatWidget, ChatWidgetBuilder, FALLBACK_REPLY, Stage};
