use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{JoinMap, JoinStore, StoreError};

/// Flat JSON document on disk. Writers serialize through `save`; there is no
/// finer-grained locking because the document is rewritten whole every time.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JoinStore for FileStore {
    async fn load(&self) -> JoinMap {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return JoinMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "join store unreadable, treating as empty");
                return JoinMap::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "join store corrupt, treating as empty");
            JoinMap::new()
        })
    }

    async fn save(&self, map: &JoinMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec(map)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
