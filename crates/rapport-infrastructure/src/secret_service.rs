//! Secret service implementation.
//!
//! Resolves the API token from `secret.json`, falling back to the
//! `RAPPORT_API_TOKEN` environment variable.

use crate::paths::{RapportPaths, ServiceType};
use rapport_core::config::SecretConfig;
use rapport_core::credential::{BearerToken, CredentialProvider};
use rapport_core::{RapportError, Result};
use std::sync::{Arc, RwLock};

pub const ENV_API_TOKEN: &str = "RAPPORT_API_TOKEN";

/// Credential provider backed by `secret.json`.
///
/// The parsed file is cached after the first read.
#[derive(Clone)]
pub struct SecretServiceImpl {
    paths: RapportPaths,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: RapportPaths) -> Self {
        Self {
            paths,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Loads `secret.json`, or an empty config when the file is absent.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        {
            let read_lock = self.secrets.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let path = self
            .paths
            .get_path(ServiceType::Secret)
            .map_err(|e| RapportError::config(e.to_string()))?;

        let loaded = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<SecretConfig>(&raw)?
        } else {
            tracing::debug!("[SecretService] No secret file at {}", path.display());
            SecretConfig::default()
        };

        let mut write_lock = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    fn resolve_token(&self, env_lookup: impl Fn(&str) -> Option<String>) -> Result<BearerToken> {
        let from_file = self
            .load_secrets()?
            .api_token
            .filter(|t| !t.trim().is_empty());

        let token = match from_file {
            Some(token) => token,
            None => {
                tracing::debug!("[SecretService] Falling back to {}", ENV_API_TOKEN);
                env_lookup(ENV_API_TOKEN).ok_or_else(|| {
                    RapportError::security(format!(
                        "No API token found in secret.json or {}",
                        ENV_API_TOKEN
                    ))
                })?
            }
        };
        BearerToken::new(token)
    }
}

#[async_trait::async_trait]
impl CredentialProvider for SecretServiceImpl {
    async fn current_credential(&self) -> Result<BearerToken> {
        self.resolve_token(|key| std::env::var(key).ok())
    }
}
