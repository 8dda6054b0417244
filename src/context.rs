use std::sync::Arc;

use crate::configs::app::APP_CONFIG;
use crate::configs::telegram::TELEGRAM_CONFIGS;
use crate::services::membership::MembershipGuard;
use crate::storage::{FileStore, JoinStore};
use crate::telegram::{ModerationProvider, TelegramApi};

#[derive(Clone)]
pub struct Context {
    pub api: Arc<TelegramApi>,
    pub guard: Arc<MembershipGuard>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_store(Arc::new(FileStore::new(&APP_CONFIG.data_file)))
    }

    pub fn with_store(store: Arc<dyn JoinStore>) -> Self {
        let api = Arc::new(TelegramApi::new(&TELEGRAM_CONFIGS.bot_token));
        let moderation: Arc<dyn ModerationProvider> = api.clone();
        Self::with_parts(api, store, moderation)
    }

    /// Test seam: inject both the store and the moderation capability.
    pub fn with_parts(
        api: Arc<TelegramApi>,
        store: Arc<dyn JoinStore>,
        moderation: Arc<dyn ModerationProvider>,
    ) -> Self {
        let guard = Arc::new(MembershipGuard::new(store, moderation));
        Self { api, guard }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
