//! Application layer for Rapport.
//!
//! Use cases that coordinate the backend, credentials and the pure domain
//! logic in `rapport-core`.

pub mod chat_assistant_service;
pub mod note_aggregation_service;

pub use chat_assistant_service::ChatAssistantService;
pub use note_aggregation_service::NoteAggregationService;
