//! Notes backend trait.
//!
//! Defines the two read operations the note aggregation depends on.

use crate::credential::BearerToken;
use crate::error::Result;
use crate::note::NotesPayload;
use crate::transcript::SessionsResponse;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Resource name used in errors for the structured notes endpoint.
pub const NOTES_RESOURCE: &str = "notes";
/// Resource name used in errors for the transcript sessions endpoint.
pub const SESSIONS_RESOURCE: &str = "sessions";

/// Read access to the remote notes and transcript resources.
///
/// Both calls take the credential explicitly so one aggregation can pin a
/// single token across them.
///
/// # Error contract
///
/// - `RapportError::Transport`: the request could not complete
/// - `RapportError::InvalidStatus`: non-success HTTP status
/// - `RapportError::Decode`: success status but unexpected body
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// Fetches `GET /notes/{subject_id}/{date}` and returns its `data` object.
    async fn fetch_notes(
        &self,
        credential: &BearerToken,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<NotesPayload>;

    /// Fetches `GET /sessions/{subject_id}/{date}`.
    async fn fetch_transcript_sessions(
        &self,
        credential: &BearerToken,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<SessionsResponse>;
}
