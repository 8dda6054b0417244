use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::telegram::types::User;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("telegram transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("telegram rejected {method}: {description}")]
    Rejected {
        method: &'static str,
        description: String,
    },
}

/// Bot API response envelope: `{"ok": bool, "result": ..., "description": ...}`.
#[derive(Debug, serde::Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

pub struct TelegramApi {
    client: reqwest::Client,
    base: String,
}

impl TelegramApi {
    pub fn new(token: &str) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build telegram client");

        Self {
            client,
            base: format!("https://api.telegram.org/bot{token}"),
        }
    }

    async fn call<T>(
        &self,
        method: &'static str,
        body: serde_json::Value,
    ) -> Result<T, ModerationError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base);
        let envelope: ApiEnvelope<T> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(ModerationError::Rejected {
                method,
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".into()),
            });
        }
        envelope.result.ok_or(ModerationError::Rejected {
            method,
            description: "missing result".into(),
        })
    }

    pub async fn get_me(&self) -> Result<User, ModerationError> {
        self.call("getMe", json!({})).await
    }

    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: &str,
    ) -> Result<(), ModerationError> {
        let mut body = json!({ "url": url, "allowed_updates": ["message"] });
        if !secret_token.is_empty() {
            body["secret_token"] = json!(secret_token);
        }
        self.call::<bool>("setWebhook", body).await.map(|_| ())
    }

    pub async fn ban_chat_member(
        &self,
        chat_id: i64,
        user_id: i64,
        revoke_messages: bool,
    ) -> Result<(), ModerationError> {
        self.call::<bool>(
            "banChatMember",
            json!({
                "chat_id": chat_id,
                "user_id": user_id,
                "revoke_messages": revoke_messages,
            }),
        )
        .await
        .map(|_| ())
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<(), ModerationError> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(mode) = parse_mode {
            body["parse_mode"] = json!(mode);
        }
        self.call::<serde_json::Value>("sendMessage", body)
            .await
            .map(|_| ())
    }
}

/// The moderation capability consumed by the membership guard. Injected as a
/// trait object so the guard is testable without touching the Bot API.
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    async fn ban_member(
        &self,
        chat_id: i64,
        user_id: i64,
        revoke_messages: bool,
    ) -> Result<(), ModerationError>;

    async fn send_direct_message(&self, user_id: i64, text: &str)
    -> Result<(), ModerationError>;
}

#[async_trait]
impl ModerationProvider for TelegramApi {
    async fn ban_member(
        &self,
        chat_id: i64,
        user_id: i64,
        revoke_messages: bool,
    ) -> Result<(), ModerationError> {
        self.ban_chat_member(chat_id, user_id, revoke_messages).await
    }

    async fn send_direct_message(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<(), ModerationError> {
        // A direct message goes to the chat whose id equals the user id.
        self.send_message(user_id, text, None).await
    }
}
