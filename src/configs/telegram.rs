use std::sync::LazyLock;

use crate::utils::env::{parse_env, parse_env_opt};

pub struct TelegramConfigs {
    pub bot_token: String,
    pub admin_username: String,
    pub webhook_secret: String,
    /// Public base URL for webhook registration; unset means the webhook is
    /// managed out of band.
    pub public_url: Option<String>,
}

pub static TELEGRAM_CONFIGS: LazyLock<TelegramConfigs> = LazyLock::new(|| TelegramConfigs {
    bot_token: parse_env("TELEGRAM_BOT_TOKEN", ""),
    admin_username: parse_env("ADMIN_USERNAME", ""),
    webhook_secret: parse_env("TELEGRAM_WEBHOOK_SECRET", ""),
    public_url: parse_env_opt("PUBLIC_URL"),
});
