//! Types shared by the chat widget and the backends that answer it.
//!
//! This crate establishes the protocol between the conversation
//! controller and whatever produces the next bot reply, so that the
//! widget can talk to a real HTTP endpoint or a scripted fake without
//! modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod backend;
mod error;
mod reply;
mod turn;

pub use backend::*;
pub use error::*;
pub use reply::*;
pub use turn::*;
