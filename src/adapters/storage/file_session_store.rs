//! File-based Session Store Adapter
//!
//! Stores each dialogue session as a YAML file named after its session id.
//! Survives restarts and is easy to inspect while debugging a conversation.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for dialogue sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_file_path(&self, session_id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", session_id))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, session_id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        let yaml = match fs::read_to_string(self.session_file_path(session_id)).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(session))
    }

    async fn set(&self, session_id: SessionId, session: &Session) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written snapshot
        let final_path = self.session_file_path(session_id);
        let temp_path = final_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.session_file_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }
}
