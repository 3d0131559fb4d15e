//! Path management for Rapport configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rapport/           # Config directory (platform default)
//! ├── config.toml              # Backend and logging configuration
//! ├── secret.json              # API token
//! └── logs/                    # Application logs
//!     └── rapport.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "rapport";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Files Rapport reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Logs,
}

/// Resolves Rapport paths, optionally below an explicit base directory.
#[derive(Debug, Clone)]
pub struct RapportPaths {
    base: Option<PathBuf>,
}

impl RapportPaths {
    /// `base_path` replaces the platform config directory when set.
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the Rapport configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let dir = self.config_dir()?;
        Ok(match service {
            ServiceType::Config => dir.join("config.toml"),
            ServiceType::Secret => dir.join("secret.json"),
            ServiceType::Logs => dir.join("logs"),
        })
    }
}

impl Default for RapportPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_below_base() {
        let paths = RapportPaths::new(Some(Path::new("/tmp/rapport-test")));
        assert_eq!(
            paths.get_path(ServiceType::Config).unwrap(),
            PathBuf::from("/tmp/rapport-test/config.toml")
        );
        assert_eq!(
            paths.get_path(ServiceType::Secret).unwrap(),
            PathBuf::from("/tmp/rapport-test/secret.json")
        );
        assert_eq!(
            paths.get_path(ServiceType::Logs).unwrap(),
            PathBuf::from("/tmp/rapport-test/logs")
        );
    }
}
