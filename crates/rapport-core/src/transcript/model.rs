use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session kind whose content may carry an annotation.
pub const ANALYSIS_KIND: &str = "ai_analysis";

/// Raw record from the transcript store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSession {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TranscriptSession {
    pub fn is_analysis(&self) -> bool {
        self.kind == ANALYSIS_KIND
    }
}

/// Body of `GET /sessions/{subjectId}/{date}`.
///
/// Group keys are opaque. A `BTreeMap` keeps flattening deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: BTreeMap<String, Vec<TranscriptSession>>,
}

impl SessionsResponse {
    /// All sessions across every group.
    pub fn flatten(&self) -> impl Iterator<Item = &TranscriptSession> {
        self.sessions.values().flatten()
    }
}
