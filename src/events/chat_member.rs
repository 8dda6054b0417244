use std::sync::Arc;

use chrono::Utc;

use crate::context::Context;
use crate::telegram::types::Message;

/// Handles a service message carrying `new_chat_members` or
/// `left_chat_member`. Private chats never produce bans, so membership
/// noise there is ignored wholesale.
pub async fn handle(ctx: Arc<Context>, message: &Message) -> anyhow::Result<()> {
    handle_at(ctx, message, Utc::now().timestamp()).await
}

pub async fn handle_at(ctx: Arc<Context>, message: &Message, now: i64) -> anyhow::Result<()> {
    if message.chat.is_private() {
        return Ok(());
    }

    if let Some(joined) = &message.new_chat_members {
        for user in joined {
            if user.is_bot {
                tracing::debug!(user_id = user.id, "ignoring bot join");
                continue;
            }
            // Joiners are independent; one failed write must not drop the
            // rest of the batch.
            if let Err(e) = ctx.guard.record_join(user.id, now).await {
                tracing::error!(user_id = user.id, error = %e, "failed to record join");
            }
        }
    }

    if let Some(left) = &message.left_chat_member {
        if !left.is_bot {
            ctx.guard
                .evaluate_leave(left.id, message.chat.id, now, &left.first_name)
                .await?;
        }
    }

    Ok(())
}
