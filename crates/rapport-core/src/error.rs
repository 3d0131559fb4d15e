//! Error types for the Rapport client.

use thiserror::Error;

/// A shared error type for every Rapport crate.
///
/// Backend failures carry the name of the resource they came from so callers
/// can decide which failures are fatal and which only degrade a result.
#[derive(Error, Debug, Clone)]
pub enum RapportError {
    /// The HTTP call could not complete (DNS, timeout, connection reset)
    #[error("Transport error on {resource}: {message}")]
    Transport {
        resource: &'static str,
        message: String,
    },

    /// The backend answered with a status outside the success range
    #[error("Unexpected status {status} from {resource}: {body}")]
    InvalidStatus {
        resource: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected schema
    #[error("Failed to decode {resource} response: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error for local files
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Missing or unusable credential
    #[error("Security error: {0}")]
    Security(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RapportError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(resource: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            resource,
            message: message.into(),
        }
    }

    /// Creates an InvalidStatus error
    pub fn invalid_status(resource: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::InvalidStatus {
            resource,
            status,
            body: body.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(resource: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            resource,
            message: message.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a non-success status error
    pub fn is_invalid_status(&self) -> bool {
        matches!(self, Self::InvalidStatus { .. })
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the backend resource this error refers to, if any.
    pub fn resource(&self) -> Option<&'static str> {
        match self {
            Self::Transport { resource, .. }
            | Self::InvalidStatus { resource, .. }
            | Self::Decode { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// Whether the backend could not be reached or refused the request.
    ///
    /// Decode failures are excluded: the server answered successfully but
    /// with a body we don't understand.
    pub fn is_unavailable(&self) -> bool {
        self.is_transport() || self.is_invalid_status()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RapportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RapportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RapportError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RapportError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for RapportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RapportError>`.
pub type Result<T> = std::result::Result<T, RapportError>;
