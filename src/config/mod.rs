//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTHCARE_BOT` prefix and nested values use double underscores as separators.
//! Every setting has a default, so the service starts with an empty environment.
//!
//! # Example
//!
//! ```no_run
//! use healthcare_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod dialogue;
mod error;
mod knowledge;
mod server;
mod storage;

pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation tuning
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Knowledge base location
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Session storage backend and cookie
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEALTHCARE_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTHCARE_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HEALTHCARE_BOT__STORAGE__BACKEND=file` -> `storage.backend = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEALTHCARE_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.dialogue.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("HEALTHCARE_BOT__SERVER__PORT");
        env::remove_var("HEALTHCARE_BOT__SERVER__ENVIRONMENT");
        env::remove_var("HEALTHCARE_BOT__DIALOGUE__FALLBACK_QUESTION_LIMIT");
        env::remove_var("HEALTHCARE_BOT__KNOWLEDGE__PATH");
        env::remove_var("HEALTHCARE_BOT__STORAGE__BACKEND");
        env::remove_var("HEALTHCARE_BOT__STORAGE__DIRECTORY");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.dialogue.fallback_question_limit, 10);
        assert_eq!(config.knowledge.path, PathBuf::from("data/knowledge.yaml"));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HEALTHCARE_BOT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HEALTHCARE_BOT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_file_storage_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HEALTHCARE_BOT__STORAGE__BACKEND", "file");
        env::set_var("HEALTHCARE_BOT__STORAGE__DIRECTORY", "/tmp/bot-sessions");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.directory, PathBuf::from("/tmp/bot-sessions"));
    }

    #[test]
    fn test_dialogue_limit_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HEALTHCARE_BOT__DIALOGUE__FALLBACK_QUESTION_LIMIT", "4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.dialogue.settings().fallback_question_limit, 4);
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.dialogue.fallback_question_limit = 0;

        assert_eq!(config.validate(), Err(ValidationError::InvalidFallbackLimit));
    }
}
