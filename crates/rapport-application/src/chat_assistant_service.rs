//! Chat assistant use case.

use rapport_core::chat::{ChatBackend, ChatRequest};
use rapport_core::credential::CredentialProvider;
use rapport_core::{RapportError, Result};
use std::sync::Arc;

/// Sends questions to the AI assistant, optionally scoped to a client.
pub struct ChatAssistantService {
    backend: Arc<dyn ChatBackend>,
    credentials: Arc<dyn CredentialProvider>,
}

impl ChatAssistantService {
    pub fn new(backend: Arc<dyn ChatBackend>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    /// Asks the assistant and returns its trimmed reply.
    pub async fn ask(&self, message: &str, client_id: Option<&str>) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RapportError::invalid_input("chat message must not be empty"));
        }

        let request = ChatRequest {
            message: message.to_string(),
            client_id: client_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        };
        let credential = self.credentials.current_credential().await?;

        tracing::debug!(
            "[ChatAssistant] Sending {} char message (client: {:?})",
            request.message.len(),
            request.client_id
        );
        let reply = self.backend.send_chat(&credential, &request).await?;
        Ok(reply.into_text().trim().to_string())
    }
}
