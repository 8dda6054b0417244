use std::sync::Arc;

use tokio::sync::Mutex;

use crate::configs::telegram::TELEGRAM_CONFIGS;
use crate::storage::{JoinStore, StoreError};
use crate::telegram::ModerationProvider;

/// Users who leave within this many seconds of joining get banned.
pub const GRACE_WINDOW_SECS: i64 = 300;
/// Join records strictly older than this are evicted during housekeeping.
pub const STALE_AFTER_SECS: i64 = 3600;

/// Tracks join times and bans accounts that leave a group within the grace
/// window. One instance per process; the internal lock serializes the
/// read-modify-write of the shared store document.
pub struct MembershipGuard {
    store: Arc<dyn JoinStore>,
    moderation: Arc<dyn ModerationProvider>,
    lock: Mutex<()>,
}

impl MembershipGuard {
    pub fn new(store: Arc<dyn JoinStore>, moderation: Arc<dyn ModerationProvider>) -> Self {
        Self { store, moderation, lock: Mutex::new(()) }
    }

    /// Records (or refreshes) the join time for a user. A save failure is
    /// the only error path and it is not retried.
    pub async fn record_join(&self, user_id: i64, now: i64) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut users = self.store.load().await;
        users.insert(user_id, now);
        self.store.save(&users).await?;

        tracing::info!(user_id, "recorded join time");
        Ok(())
    }

    /// Processes a leave: evicts stale records, bans if the user left within
    /// the grace window, and drops the user's record regardless of the ban
    /// outcome.
    pub async fn evaluate_leave(
        &self,
        user_id: i64,
        chat_id: i64,
        now: i64,
        first_name: &str,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut users = self.store.load().await;

        let before = users.len();
        users.retain(|_, join| now - *join <= STALE_AFTER_SECS);
        let evicted = before - users.len();
        if evicted > 0 {
            metrics::counter!("guard_evictions_total").increment(evicted as u64);
            tracing::info!(evicted, "evicted stale join records");
        }

        let Some(join) = users.remove(&user_id) else {
            tracing::info!(user_id, "leave for untracked user, no action");
            if evicted > 0 {
                self.store.save(&users).await?;
            }
            return Ok(());
        };

        let delta = now - join;
        if delta < GRACE_WINDOW_SECS {
            tracing::info!(user_id, chat_id, delta, "left within grace window, banning");
            self.ban_and_notify(user_id, chat_id, first_name).await;
        } else {
            tracing::info!(user_id, delta, "left after grace window, no ban");
        }

        self.store.save(&users).await
    }

    /// Best-effort ban plus explanatory direct message. Failures here never
    /// fail the leave flow; the record removal above already happened.
    async fn ban_and_notify(&self, user_id: i64, chat_id: i64, first_name: &str) {
        if let Err(e) = self.moderation.ban_member(chat_id, user_id, true).await {
            metrics::counter!("guard_bans_total", "result" => "failed").increment(1);
            tracing::warn!(user_id, chat_id, error = %e, "failed to ban member");
            return;
        }
        metrics::counter!("guard_bans_total", "result" => "banned").increment(1);
        tracing::info!(user_id, chat_id, "banned member");

        let text = format!(
            "Hello {first_name},\n\n\
             You have been automatically banned from the group for leaving \
             within 5 minutes of joining.\n\n\
             If you think this was a mistake, please contact the admin: @{}",
            TELEGRAM_CONFIGS.admin_username
        );
        if let Err(e) = self.moderation.send_direct_message(user_id, &text).await {
            // Common when the user never started a chat with the bot.
            tracing::warn!(user_id, error = %e, "failed to send ban notification");
        }
    }
}
