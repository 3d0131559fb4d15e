//! Infrastructure for Rapport: the REST backend, configuration files and the
//! credential store.

pub mod config_service;
pub mod paths;
pub mod rest_backend;
pub mod secret_service;

pub use crate::config_service::ConfigService;
pub use crate::paths::RapportPaths;
pub use crate::rest_backend::RestBackend;
pub use crate::secret_service::SecretServiceImpl;
