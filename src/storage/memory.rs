use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{JoinMap, JoinStore, StoreError};

/// In-memory store, used by tests and local runs without a data file.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<JoinMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self { inner: RwLock::new(entries.into_iter().collect()) }
    }

    pub async fn snapshot(&self) -> JoinMap {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl JoinStore for MemoryStore {
    async fn load(&self) -> JoinMap {
        self.inner.read().await.clone()
    }

    async fn save(&self, map: &JoinMap) -> Result<(), StoreError> {
        *self.inner.write().await = map.clone();
        Ok(())
    }
}
