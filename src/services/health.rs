use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;

static READY: LazyLock<AtomicBool> = LazyLock::new(|| AtomicBool::new(false));
static TELEGRAM_CONNECTED: LazyLock<AtomicBool> = LazyLock::new(|| AtomicBool::new(false));

pub struct HealthService;

impl HealthService {
    pub fn set_ready(state: bool) {
        READY.store(state, Ordering::Relaxed);
    }

    pub fn set_telegram(state: bool) {
        TELEGRAM_CONNECTED.store(state, Ordering::Relaxed);
    }

    pub async fn health() -> StatusCode {
        if READY.load(Ordering::Relaxed) && TELEGRAM_CONNECTED.load(Ordering::Relaxed) {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
