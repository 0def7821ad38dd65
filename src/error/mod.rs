//! Error types for every stage of reading and evaluating a tree document, and
//! the rendering of those errors for the user.

mod error_types;
mod pretty_messages;

pub use error_types::*;
pub use pretty_messages::{pretty_error_message, source_context};
