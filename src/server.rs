use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;

use crate::configs::app::APP_CONFIG;
use crate::configs::telegram::TELEGRAM_CONFIGS;
use crate::context::Context;
use crate::dispatch;
use crate::observability::metrics::init_metrics;
use crate::services::health::HealthService;
use crate::telegram::types::Update;

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

pub fn router(ctx: Arc<Context>) -> Router {
    Router::new()
        .route("/webhook", post(receive_update))
        .route("/healthz", get(HealthService::health))
        .with_state(ctx)
}

pub async fn serve(ctx: Arc<Context>, shutdown: CancellationToken) -> anyhow::Result<()> {
    let metrics_handle = init_metrics()?;
    let app = router(ctx).route(
        "/metrics",
        get({
            let handle = metrics_handle.clone();
            move || async move { handle.render() }
        }),
    );

    let listener = tokio::net::TcpListener::bind(&APP_CONFIG.bind_addr).await?;
    tracing::info!(addr = %APP_CONFIG.bind_addr, "webhook server listening");
    HealthService::set_ready(true);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    HealthService::set_ready(false);
    Ok(())
}

fn secret_matches(headers: &HeaderMap) -> bool {
    let expected = TELEGRAM_CONFIGS.webhook_secret.as_str();
    if expected.is_empty() {
        return true;
    }
    headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|got| got == expected)
}

/// Webhook entry point. Once the sender is authenticated, the response is
/// 200 no matter what happened inside: a non-2xx answer makes Telegram
/// redeliver the same update in a loop.
async fn receive_update(
    State(ctx): State<Arc<Context>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if !secret_matches(&headers) {
        tracing::warn!("webhook call with bad secret token");
        return StatusCode::UNAUTHORIZED;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed update");
            return StatusCode::OK;
        }
    };

    dispatch::dispatch_update(ctx, update).await;
    StatusCode::OK
}
