//! AI transcript sessions and annotation extraction.
//!
//! Analysis transcripts are freeform text. An analyst annotation is embedded
//! after a `NOTES:` marker; everything after the first marker is the note.

mod annotation;
mod model;

pub use annotation::{ExtractedAnnotation, extract_annotation, extract_annotation_text};
pub use model::{ANALYSIS_KIND, SessionsResponse, TranscriptSession};
