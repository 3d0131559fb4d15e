use super::model::TranscriptSession;
use crate::note::Note;
use crate::timestamp::{Clock, TimestampSource, parse_or_now};

const NOTES_MARKER: &str = "NOTES:";
const EMPTY_ANNOTATION: &str = "none";

/// A machine note pulled out of a transcript, with how its timestamp was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAnnotation {
    pub note: Note,
    pub timestamp_source: TimestampSource,
}

/// Returns the annotation embedded in `content`, if any.
///
/// Takes the text after the first `NOTES:` marker, trimmed. Blank text and a
/// literal `none` (any case) mean there is no annotation.
pub fn extract_annotation_text(content: &str) -> Option<&str> {
    let (_, after) = content.split_once(NOTES_MARKER)?;
    // Only the segment up to a second marker counts.
    let segment = after.split(NOTES_MARKER).next().unwrap_or_default();
    let text = segment.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(EMPTY_ANNOTATION) {
        return None;
    }
    Some(text)
}

/// Builds an AI note from an analysis session.
///
/// Sessions of another kind, or missing `content` or `timestamp`, yield nothing.
pub fn extract_annotation(
    session: &TranscriptSession,
    clock: &dyn Clock,
) -> Option<ExtractedAnnotation> {
    if !session.is_analysis() {
        return None;
    }
    let content = session.content.as_deref()?;
    let raw_timestamp = session.timestamp.as_deref()?;
    let text = extract_annotation_text(content)?;

    let parsed = parse_or_now(raw_timestamp, clock);
    Some(ExtractedAnnotation {
        note: Note::machine(text, parsed.value),
        timestamp_source: parsed.source,
    })
}
