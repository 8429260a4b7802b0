//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which session store to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Name of the cookie that carries the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Seconds without a message before the memory backend evicts a session
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

/// Available session store backends
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.directory"));
        }
        let valid_cookie = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_cookie {
            return Err(ValidationError::InvalidCookieName(self.cookie_name.clone()));
        }
        if self.idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        Ok(())
    }

    /// Get the session idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("data/sessions")
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    3600
}
