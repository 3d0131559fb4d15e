//! Bearer credential handling.
//!
//! Defines the interface for obtaining the API token attached to every
//! backend request.

use crate::error::{RapportError, Result};
use std::fmt;

/// An opaque bearer token.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RapportError::security("API token is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Supplies the credential for backend calls.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Tokens are never logged or exposed in error messages
/// - A caller that needs several requests to agree takes one snapshot and
///   reuses it
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the token to use right now.
    async fn current_credential(&self) -> Result<BearerToken>;
}

/// A provider that always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    token: BearerToken,
}

impl StaticCredentialProvider {
    pub fn new(token: BearerToken) -> Self {
        Self { token }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn current_credential(&self) -> Result<BearerToken> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = BearerToken::new("s3cr3t").unwrap();
        assert_eq!(format!("{:?}", token), "BearerToken(<redacted>)");
        assert_eq!(token.header_value(), "Bearer s3cr3t");
    }

    #[test]
    fn test_blank_token_is_rejected() {
        assert!(BearerToken::new("   ").is_err());
        assert_eq!(BearerToken::new(" abc\n").unwrap().expose(), "abc");
    }

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticCredentialProvider::new(BearerToken::new("abc").unwrap());
        assert_eq!(provider.current_credential().await.unwrap().expose(), "abc");
    }
}
