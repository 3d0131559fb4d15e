//! Merging structured notes with transcript annotations.
//!
//! This is the synchronous half of a notes fetch: the caller performs the two
//! reads and hands the payloads over. Nothing here does I/O.

use super::model::{Note, NoteCollection, NotesPayload, RawNoteEntry};
use crate::timestamp::{Clock, parse_or_now};
use crate::transcript::{SessionsResponse, extract_annotation};

/// What happened while building a [`NoteCollection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// False when the transcript resource was unavailable and only structured
    /// notes were used.
    pub transcripts_available: bool,
    /// Number of AI annotations merged into the conversation list.
    pub annotations_extracted: usize,
    /// Number of timestamps that failed to parse and were replaced by now.
    pub fallback_timestamps: usize,
}

impl AggregationReport {
    pub fn is_degraded(&self) -> bool {
        !self.transcripts_available
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationOutcome {
    pub collection: NoteCollection,
    pub report: AggregationReport,
}

/// Builds the note collection for one subject and day.
///
/// `sessions` is `None` when the transcript resource could not be used; the
/// result then holds structured notes only. Conversation notes end up newest
/// first. The sort is stable, so on equal timestamps structured notes stay
/// ahead of annotations. Status notes keep source order.
pub fn aggregate_notes(
    subject_id: &str,
    notes: NotesPayload,
    sessions: Option<&SessionsResponse>,
    clock: &dyn Clock,
) -> AggregationOutcome {
    let mut report = AggregationReport {
        transcripts_available: sessions.is_some(),
        ..AggregationReport::default()
    };

    let mut conversation_notes = convert_entries(notes.conversation, clock, &mut report);
    let status_notes = convert_entries(notes.status, clock, &mut report);

    if let Some(sessions) = sessions {
        for extracted in sessions
            .flatten()
            .filter_map(|session| extract_annotation(session, clock))
        {
            if extracted.timestamp_source.is_fallback() {
                report.fallback_timestamps += 1;
            }
            report.annotations_extracted += 1;
            conversation_notes.push(extracted.note);
        }
    }

    conversation_notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    AggregationOutcome {
        collection: NoteCollection {
            subject_id: subject_id.to_string(),
            conversation_notes,
            status_notes,
        },
        report,
    }
}

fn convert_entries(
    entries: Vec<RawNoteEntry>,
    clock: &dyn Clock,
    report: &mut AggregationReport,
) -> Vec<Note> {
    entries
        .into_iter()
        .map(|entry| {
            let parsed = parse_or_now(&entry.timestamp, clock);
            if parsed.is_fallback() {
                report.fallback_timestamps += 1;
            }
            Note::new(entry.text, parsed.value, entry.author)
        })
        .collect()
}
