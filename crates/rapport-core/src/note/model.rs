//! Note domain model.
//!
//! Contains the normalized `Note` entity, the per-day `NoteCollection`, and the
//! wire DTOs returned by the structured notes resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author attribution reserved for machine-generated notes.
pub const AI_AUTHOR: &str = "AI";

/// A single annotation record.
///
/// Notes are immutable once built; every fetch produces fresh instances with
/// fresh identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Identifier generated at construction time (UUID v4).
    pub id: String,
    /// Trimmed, non-empty content.
    pub text: String,
    /// When the note was authored or generated. Used for ordering.
    pub timestamp: DateTime<Utc>,
    /// Free-text attribution. [`AI_AUTHOR`] marks machine-generated notes.
    pub author: String,
}

impl Note {
    /// Creates a note with a freshly generated identifier.
    pub fn new(
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            timestamp,
            author: author.into(),
        }
    }

    /// Creates a machine-generated note.
    pub fn machine(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text, timestamp, AI_AUTHOR)
    }

    pub fn is_machine_generated(&self) -> bool {
        self.author == AI_AUTHOR
    }

    /// `author: text`, as shown in note lists.
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.author, self.text)
    }
}

/// Notes for one subject on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCollection {
    pub subject_id: String,
    /// Structured conversation notes merged with extracted annotations, newest first.
    pub conversation_notes: Vec<Note>,
    /// Structured status notes in source order.
    pub status_notes: Vec<Note>,
}

impl NoteCollection {
    pub fn is_empty(&self) -> bool {
        self.conversation_notes.is_empty() && self.status_notes.is_empty()
    }

    /// Number of machine-generated entries in the conversation list.
    pub fn machine_note_count(&self) -> usize {
        self.conversation_notes
            .iter()
            .filter(|note| note.is_machine_generated())
            .count()
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// One raw entry from `GET /notes/{subjectId}/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNoteEntry {
    pub text: String,
    /// ISO-8601, parsed leniently during aggregation.
    pub timestamp: String,
    pub author: String,
}

/// The `data` object of the notes response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPayload {
    pub subject_id: String,
    pub conversation: Vec<RawNoteEntry>,
    pub status: Vec<RawNoteEntry>,
}

/// Envelope of `GET /notes/{subjectId}/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesResponse {
    pub status: serde_json::Value,
    pub data: NotesPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notes_get_unique_ids() {
        let now = Utc::now();
        let a = Note::new("Called client", now, "agent1");
        let b = Note::new("Called client", now, "agent1");
        assert_ne!(a.id, b.id);
        assert!(!a.is_machine_generated());
    }

    #[test]
    fn test_machine_note_display() {
        let note = Note::machine("Follow up next week", Utc::now());
        assert!(note.is_machine_generated());
        assert_eq!(note.display_line(), "AI: Follow up next week");
    }

    #[test]
    fn test_notes_response_decodes_camel_case() {
        let json = r#"{
            "status": "success",
            "data": {
                "subjectId": "c-42",
                "conversation": [
                    {"text": "Called client", "timestamp": "2024-01-01T10:00:00Z", "author": "agent1"}
                ],
                "status": []
            }
        }"#;
        let response: NotesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.subject_id, "c-42");
        assert_eq!(response.data.conversation.len(), 1);
        assert!(response.data.status.is_empty());
    }

    #[test]
    fn test_notes_response_requires_data() {
        let result = serde_json::from_str::<NotesResponse>(r#"{"status": "success"}"#);
        assert!(result.is_err());
    }
}
