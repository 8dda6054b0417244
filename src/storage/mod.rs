use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Tracked join times, `user_id -> epoch seconds`. User ids share one
/// keyspace across all chats.
pub type JoinMap = HashMap<i64, i64>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write join store: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode join store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Backing store for the join map. The whole document is read and rewritten
/// on every mutation; `load` never fails — missing or unreadable data yields
/// an empty map.
#[async_trait]
pub trait JoinStore: Send + Sync {
    async fn load(&self) -> JoinMap;
    async fn save(&self, map: &JoinMap) -> Result<(), StoreError>;
}
