#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use telegram_guard::context::Context;
use telegram_guard::storage::{JoinMap, JoinStore, MemoryStore, StoreError};
use telegram_guard::telegram::api::{ModerationError, ModerationProvider, TelegramApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationCall {
    Ban { chat_id: i64, user_id: i64, revoke_messages: bool },
    DirectMessage { user_id: i64, text: String },
}

/// Moderation capability that records calls instead of hitting the Bot API.
/// With `fail_bans` set every ban attempt errors, for testing that a failed
/// ban still completes the leave flow.
#[derive(Default)]
pub struct RecordingModeration {
    pub calls: Mutex<Vec<ModerationCall>>,
    pub fail_bans: bool,
}

impl RecordingModeration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_bans: true }
    }

    pub async fn calls(&self) -> Vec<ModerationCall> {
        self.calls.lock().await.clone()
    }

    pub async fn ban_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, ModerationCall::Ban { .. }))
            .count()
    }
}

#[async_trait]
impl ModerationProvider for RecordingModeration {
    async fn ban_member(
        &self,
        chat_id: i64,
        user_id: i64,
        revoke_messages: bool,
    ) -> Result<(), ModerationError> {
        self.calls
            .lock()
            .await
            .push(ModerationCall::Ban { chat_id, user_id, revoke_messages });
        if self.fail_bans {
            return Err(ModerationError::Rejected {
                method: "banChatMember",
                description: "not enough rights".into(),
            });
        }
        Ok(())
    }

    async fn send_direct_message(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<(), ModerationError> {
        self.calls
            .lock()
            .await
            .push(ModerationCall::DirectMessage { user_id, text: text.into() });
        Ok(())
    }
}

/// Store whose saves fail with an I/O error, either forever or only for the
/// first `n` attempts. Loads pass through to the wrapped map.
pub struct FailingStore {
    inner: MemoryStore,
    failures_left: AtomicUsize,
}

impl FailingStore {
    pub fn always() -> Self {
        Self::with_entries([])
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            inner: MemoryStore::with_entries(entries),
            failures_left: AtomicUsize::new(usize::MAX),
        }
    }

    pub fn failing_once() -> Self {
        Self { inner: MemoryStore::new(), failures_left: AtomicUsize::new(1) }
    }

    pub async fn snapshot(&self) -> JoinMap {
        self.inner.snapshot().await
    }
}

#[async_trait]
impl JoinStore for FailingStore {
    async fn load(&self) -> JoinMap {
        self.inner.load().await
    }

    async fn save(&self, map: &JoinMap) -> Result<(), StoreError> {
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            if left != usize::MAX {
                self.failures_left.store(left - 1, Ordering::SeqCst);
            }
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.inner.save(map).await
    }
}

pub fn test_context(
    store: Arc<dyn JoinStore>,
    moderation: Arc<RecordingModeration>,
) -> Arc<Context> {
    let api = Arc::new(TelegramApi::new("test-token"));
    Arc::new(Context::with_parts(api, store, moderation))
}

pub fn join_update(update_id: i64, chat_id: i64, user_ids: &[i64]) -> Value {
    let members: Vec<Value> = user_ids
        .iter()
        .map(|id| json!({"id": id, "first_name": format!("user{id}"), "is_bot": false}))
        .collect();
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "chat": {"id": chat_id, "type": if chat_id > 0 { "private" } else { "supergroup" }},
            "new_chat_members": members,
        }
    })
}

pub fn leave_update(update_id: i64, chat_id: i64, user_id: i64) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "chat": {"id": chat_id, "type": if chat_id > 0 { "private" } else { "supergroup" }},
            "left_chat_member": {"id": user_id, "first_name": format!("user{user_id}"), "is_bot": false},
        }
    })
}
