//! RestBackend - reqwest implementation of the Rapport REST API.
//!
//! Implements `NotesBackend` and `ChatBackend`. Every request carries the
//! bearer credential handed in by the caller; the backend itself holds no
//! token.

use async_trait::async_trait;
use chrono::NaiveDate;
use rapport_core::chat::{CHAT_RESOURCE, ChatBackend, ChatReply, ChatRequest};
use rapport_core::config::BackendSettings;
use rapport_core::credential::BearerToken;
use rapport_core::note::repository::{NOTES_RESOURCE, SESSIONS_RESOURCE};
use rapport_core::note::{NotesBackend, NotesPayload, NotesResponse};
use rapport_core::timestamp::format_wire_date;
use rapport_core::transcript::SessionsResponse;
use rapport_core::{RapportError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the Rapport backend.
#[derive(Clone, Debug)]
pub struct RestBackend {
    client: Client,
    base_url: Url,
}

impl RestBackend {
    /// Creates a backend rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RapportError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RapportError::config(format!(
                "Base URL '{}' cannot hold a path",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RapportError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &BackendSettings) -> Result<Self> {
        Self::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RapportError::internal("base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, credential: &BearerToken) -> RequestBuilder {
        request.header(AUTHORIZATION, credential.header_value())
    }

    /// Sends `request` and returns the body of a successful response.
    async fn send(&self, resource: &'static str, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| RapportError::transport(resource, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("[RestBackend] {} returned {}", resource, status);
            return Err(RapportError::invalid_status(resource, status.as_u16(), body));
        }

        response
            .text()
            .await
            .map_err(|e| RapportError::transport(resource, format!("Failed to read body: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
        credential: &BearerToken,
    ) -> Result<T> {
        tracing::debug!("[RestBackend] GET {}", url);
        let body = self
            .send(resource, self.authorized(self.client.get(url), credential))
            .await?;
        serde_json::from_str(&body).map_err(|e| RapportError::decode(resource, e.to_string()))
    }
}

#[async_trait]
impl NotesBackend for RestBackend {
    async fn fetch_notes(
        &self,
        credential: &BearerToken,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<NotesPayload> {
        let url = self.endpoint(&["notes", subject_id, &format_wire_date(date)])?;
        let response: NotesResponse = self.get_json(NOTES_RESOURCE, url, credential).await?;
        Ok(response.data)
    }

    async fn fetch_transcript_sessions(
        &self,
        credential: &BearerToken,
        subject_id: &str,
        date: NaiveDate,
    ) -> Result<SessionsResponse> {
        let url = self.endpoint(&["sessions", subject_id, &format_wire_date(date)])?;
        self.get_json(SESSIONS_RESOURCE, url, credential).await
    }
}

#[async_trait]
impl ChatBackend for RestBackend {
    async fn send_chat(&self, credential: &BearerToken, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint(&["chat"])?;
        tracing::debug!("[RestBackend] POST {}", url);
        let body = self
            .send(
                CHAT_RESOURCE,
                self.authorized(self.client.post(url).json(request), credential),
            )
            .await?;
        ChatReply::from_json(&body)
    }
}
