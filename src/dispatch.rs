use std::sync::Arc;

use crate::context::Context;
use crate::events::{chat_member, command};
use crate::telegram::types::Update;

fn update_kind(update: &Update) -> &'static str {
    let Some(message) = &update.message else {
        return "other";
    };
    if message.new_chat_members.is_some() || message.left_chat_member.is_some() {
        "membership"
    } else if message.text.as_deref().is_some_and(|t| t.starts_with('/')) {
        "command"
    } else {
        "other"
    }
}

/// Routes one inbound update. Handler failures are logged and discarded so
/// the transport can always acknowledge the update; surfacing them would
/// only make Telegram redeliver it.
pub async fn dispatch_update(ctx: Arc<Context>, update: Update) {
    let kind = update_kind(&update);
    metrics::counter!("guard_updates_total", "kind" => kind).increment(1);

    let Some(message) = &update.message else {
        return;
    };

    match kind {
        "membership" => {
            if let Err(e) = chat_member::handle(ctx, message).await {
                tracing::error!(update_id = update.update_id, error = %e, "membership handler failed");
            }
        }
        "command" => {
            if let Err(e) = command::handle(ctx, message).await {
                tracing::warn!(update_id = update.update_id, error = %e, "command handler failed");
            }
        }
        _ => {}
    }
}
