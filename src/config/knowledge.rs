//! Knowledge base configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Knowledge base configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the knowledge base YAML file
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/knowledge.yaml")
}
