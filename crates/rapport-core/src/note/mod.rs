//! Note domain module.
//!
//! # Module Structure
//!
//! - `model`: `Note`, `NoteCollection` and the notes wire DTOs
//! - `aggregate`: merging structured notes with transcript annotations
//! - `repository`: backend trait the aggregation reads from
//!
//! # Usage
//!
//! ```ignore
//! use rapport_core::note::{Note, NoteCollection, NotesBackend};
//! use rapport_core::note::{aggregate_notes, AggregationOutcome};
//! ```

mod aggregate;
mod model;
pub mod repository;

pub use aggregate::{AggregationOutcome, AggregationReport, aggregate_notes};
pub use model::{AI_AUTHOR, Note, NoteCollection, NotesPayload, NotesResponse, RawNoteEntry};
pub use repository::NotesBackend;
