//! Note aggregation use case.
//!
//! Performs the two backend reads for a subject and day and hands the
//! payloads to the pure merge in `rapport_core::note`.

use chrono::NaiveDate;
use rapport_core::credential::CredentialProvider;
use rapport_core::note::{AggregationOutcome, NoteCollection, NotesBackend, aggregate_notes};
use rapport_core::timestamp::{Clock, SystemClock, format_wire_date};
use rapport_core::{RapportError, Result};
use std::sync::Arc;

/// Builds per-day note collections from the notes and transcript resources.
///
/// # Failure semantics
///
/// - Structured notes are required: transport errors, non-success statuses
///   and decode errors fail the whole call.
/// - Transcripts are best effort for availability only: a transport error or
///   non-success status yields a structured-only collection, but a success
///   status with an undecodable body still fails.
///
/// The service holds no mutable state; concurrent calls are independent.
pub struct NoteAggregationService {
    backend: Arc<dyn NotesBackend>,
    credentials: Arc<dyn CredentialProvider>,
    clock: Arc<dyn Clock>,
}

impl NoteAggregationService {
    pub fn new(backend: Arc<dyn NotesBackend>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            backend,
            credentials,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for timestamp fallbacks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches and merges the notes for `subject_id` on `date`.
    pub async fn fetch_aggregated_notes(
        &self,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<NoteCollection> {
        Ok(self.fetch_with_report(subject_id, date).await?.collection)
    }

    /// Same as [`fetch_aggregated_notes`](Self::fetch_aggregated_notes), also
    /// returning what was degraded or substituted along the way.
    pub async fn fetch_with_report(
        &self,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<AggregationOutcome> {
        let subject_id = subject_id.trim();
        if subject_id.is_empty() {
            return Err(RapportError::invalid_input("subject id must not be empty"));
        }

        // One snapshot for both calls.
        let credential = self.credentials.current_credential().await?;
        let wire_date = format_wire_date(date);

        tracing::debug!(
            "[NoteAggregation] Fetching notes for {} on {}",
            subject_id,
            wire_date
        );
        let notes = self
            .backend
            .fetch_notes(&credential, subject_id, date)
            .await
            .inspect_err(|e| {
                tracing::error!("[NoteAggregation] Notes fetch failed for {}: {}", subject_id, e)
            })?;

        let sessions = match self
            .backend
            .fetch_transcript_sessions(&credential, subject_id, date)
            .await
        {
            Ok(sessions) => Some(sessions),
            Err(e) if e.is_unavailable() => {
                tracing::warn!(
                    "[NoteAggregation] Transcripts unavailable for {} on {}, using structured notes only: {}",
                    subject_id,
                    wire_date,
                    e
                );
                None
            }
            Err(e) => return Err(e),
        };

        let outcome = aggregate_notes(subject_id, notes, sessions.as_ref(), self.clock.as_ref());

        if outcome.report.fallback_timestamps > 0 {
            tracing::warn!(
                "[NoteAggregation] {} timestamp(s) for {} on {} could not be parsed and were set to now",
                outcome.report.fallback_timestamps,
                subject_id,
                wire_date
            );
        }
        tracing::info!(
            "[NoteAggregation] {} on {}: {} conversation note(s) ({} from AI), {} status note(s)",
            subject_id,
            wire_date,
            outcome.collection.conversation_notes.len(),
            outcome.report.annotations_extracted,
            outcome.collection.status_notes.len()
        );

        Ok(outcome)
    }
}
