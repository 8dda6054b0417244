use std::sync::Arc;

use telegram_guard::{
    configs::telegram::TELEGRAM_CONFIGS,
    context::Context,
    server,
    services::health::HealthService,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    if TELEGRAM_CONFIGS.bot_token.is_empty() {
        anyhow::bail!("TELEGRAM_BOT_TOKEN is not set");
    }
    if TELEGRAM_CONFIGS.admin_username.is_empty() {
        anyhow::bail!("ADMIN_USERNAME is not set");
    }

    let shutdown_token = CancellationToken::new();
    let token_clone = shutdown_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        token_clone.cancel();
    });

    let ctx = Arc::new(Context::new());

    let me = ctx.api.get_me().await?;
    tracing::info!(bot = %me.first_name, id = me.id, "authenticated with telegram");
    HealthService::set_telegram(true);

    if let Some(base) = &TELEGRAM_CONFIGS.public_url {
        let webhook_url = format!("{}/webhook", base.trim_end_matches('/'));
        ctx.api
            .set_webhook(&webhook_url, &TELEGRAM_CONFIGS.webhook_secret)
            .await?;
        tracing::info!(url = %webhook_url, "registered telegram webhook");
    }

    server::serve(ctx, shutdown_token).await
}
