//! Core domain for Rapport.
//!
//! Holds the note and transcript models, the pure aggregation that merges
//! them, the backend traits implemented by the infrastructure crate, and the
//! shared error type.

pub mod chat;
pub mod config;
pub mod credential;
pub mod error;
pub mod note;
pub mod text;
pub mod timestamp;
pub mod transcript;

// Re-export common error type
pub use error::{RapportError, Result};
