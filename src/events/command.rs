use std::borrow::Cow;
use std::sync::Arc;

use crate::configs::telegram::TELEGRAM_CONFIGS;
use crate::context::Context;
use crate::telegram::types::Message;

/// Extracts the command verb from a message text, stripping the optional
/// `@botname` suffix Telegram appends in groups.
pub(crate) fn parse_command(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    Some(first.split('@').next().unwrap_or(first))
}

pub(crate) fn escape_html(raw: &str) -> Cow<'_, str> {
    if raw.contains(['&', '<', '>']) {
        Cow::Owned(
            raw.replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        )
    } else {
        Cow::Borrowed(raw)
    }
}

/// `/start` and `/help` in private chats, mirroring the group-guard rules in
/// the replies.
pub async fn handle(ctx: Arc<Context>, message: &Message) -> anyhow::Result<()> {
    if !message.chat.is_private() {
        return Ok(());
    }
    let (Some(text), Some(from)) = (&message.text, &message.from) else {
        return Ok(());
    };

    match parse_command(text) {
        Some("/start") => {
            tracing::info!(user_id = from.id, "received /start command");
            let mention = format!(
                "<a href=\"tg://user?id={}\">{}</a>",
                from.id,
                escape_html(&from.first_name)
            );
            let reply = format!(
                "Hello {mention}! 👋\n\n\
                 I am a bot that manages group memberships. I will automatically \
                 ban users who leave a group within 5 minutes of joining.\n\n\
                 If you have any issues, please contact my admin: @{}\n\n\
                 Use /help to see available commands.",
                TELEGRAM_CONFIGS.admin_username
            );
            ctx.api.send_message(message.chat.id, &reply, Some("HTML")).await?;
        }
        Some("/help") => {
            let reply = "Here are the available commands:\n\n\
                         /start - Welcome message and bot info.\n\
                         /help - Shows this help message.\n\n\
                         To use me, add me to your group as an administrator with \
                         the 'Ban Users' permission.";
            ctx.api.send_message(message.chat.id, reply, None).await?;
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_plain() {
        assert_eq!(parse_command("/start"), Some("/start"));
    }

    #[test]
    fn test_parse_command_with_bot_suffix() {
        assert_eq!(parse_command("/help@guard_bot extra"), Some("/help"));
    }

    #[test]
    fn test_parse_command_rejects_plain_text() {
        assert_eq!(parse_command("hello /start"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Ana"), "Ana");
        assert_eq!(escape_html("<b>&x"), "&lt;b&gt;&amp;x");
    }
}
