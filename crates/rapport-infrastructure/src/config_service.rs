//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and applies environment
//! overrides on top.

use crate::paths::{RapportPaths, ServiceType};
use rapport_core::config::RootConfig;
use rapport_core::{RapportError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Overrides `backend.base_url`.
pub const ENV_API_URL: &str = "RAPPORT_API_URL";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: RapportPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new(paths: RapportPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file is created with defaults. Environment overrides are
    /// applied after loading.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<RootConfig> {
        let config_path = self.config_path()?;

        if !config_path.exists() {
            let default_config = RootConfig::default();
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&config_path, toml::to_string_pretty(&default_config)?)?;
            tracing::info!(
                "[ConfigService] Created default config at {}",
                config_path.display()
            );
            return Ok(default_config);
        }

        let raw = std::fs::read_to_string(&config_path)?;
        let config: RootConfig = toml::from_str(&raw)?;
        tracing::debug!("[ConfigService] Loaded config from {}", config_path.display());
        Ok(config)
    }

    fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .get_path(ServiceType::Config)
            .map_err(|e| RapportError::config(e.to_string()))
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut RootConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("[ConfigService] Using {} override", ENV_API_URL);
        config.backend.base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn service(dir: &Path) -> ConfigService {
        ConfigService::new(RapportPaths::new(Some(dir)))
    }

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let svc = service(temp.path());

        let config = svc.load_config().unwrap();

        assert_eq!(config, RootConfig::default());
        assert!(temp.path().join("config.toml").exists());
    }

    #[test]
    fn test_existing_config_is_read() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[backend]\nbase_url = \"https://crm.example.com\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = service(temp.path()).load_config().unwrap();

        assert_eq!(config.backend.base_url, "https://crm.example.com");
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn test_malformed_config_is_serialization_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[backend\n").unwrap();

        let err = service(temp.path()).load_config().unwrap_err();

        assert!(matches!(err, RapportError::Serialization { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = RootConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == ENV_API_URL).then(|| " https://override.example.com ".to_string())
        });
        assert_eq!(config.backend.base_url, "https://override.example.com");

        let mut config = RootConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config, RootConfig::default());
    }

    #[test]
    fn test_invalidate_cache_reloads() {
        let temp = tempfile::tempdir().unwrap();
        let svc = service(temp.path());
        svc.get_config().unwrap();

        std::fs::write(
            temp.path().join("config.toml"),
            "[backend]\ntimeout_secs = 7\n",
        )
        .unwrap();
        svc.invalidate_cache();

        assert_eq!(svc.get_config().unwrap().backend.timeout_secs, 7);
    }
}
