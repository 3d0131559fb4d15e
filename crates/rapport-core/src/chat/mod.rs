//! AI chat assistant types.
//!
//! The chat endpoint is loose about its reply shape: depending on the backend
//! version it returns a bare string or an object with one of several keys.
//! [`ChatReply`] decodes each known shape in a fixed order.

use crate::credential::BearerToken;
use crate::error::{RapportError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Resource name used in errors for the chat endpoint.
pub const CHAT_RESOURCE: &str = "chat";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Assistant reply, in the order the shapes are tried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    Text(String),
    Response { response: String },
    Reply { reply: String },
    Message { message: String },
    Content { content: String },
}

impl ChatReply {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text)
            | Self::Response { response: text }
            | Self::Reply { reply: text }
            | Self::Message { message: text }
            | Self::Content { content: text } => text,
        }
    }

    /// Decodes a raw response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| {
            RapportError::decode(CHAT_RESOURCE, format!("unrecognized reply shape: {}", e))
        })
    }
}

/// Transport for the chat assistant.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, credential: &BearerToken, request: &ChatRequest) -> Result<ChatReply>;
}
