//! Minimal Telegram Bot API client: `sendMessage` and long-polling `getUpdates`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{NotifyError, truncate_body};

use super::Notifier;

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Must exceed the long-poll timeout passed to `getUpdates`.
const TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramClient {
    token: String,
    base_url: String,
    http: Client,
}

// Keeps the bot token out of logs.
impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Only `message_id` is read back from a sent message.
#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

impl TelegramClient {
    pub fn new(token: String) -> Result<Self, NotifyError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: String, base_url: impl Into<String>) -> Result<Self, NotifyError> {
        let http = Client::builder().timeout(TIMEOUT).build().map_err(NotifyError::Request)?;
        Ok(Self {
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, NotifyError> {
        let res = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.without_url()))?;

        let sent: SentMessage = Self::read(res).await?;
        debug!(message_id = sent.message_id, "message delivered");
        Ok(sent.message_id)
    }

    /// Long-poll for updates newer than `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, NotifyError> {
        let mut query = vec![("timeout", timeout_secs.to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let res = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&query)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.without_url()))?;

        Self::read(res).await
    }

    async fn read<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, NotifyError> {
        let status = res.status();
        let body = res.text().await.map_err(|e| NotifyError::Request(e.without_url()))?;

        let parsed: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(NotifyError::Status { status, body: truncate_body(&body) });
            }
            Err(err) => return Err(NotifyError::Parse(err)),
        };

        match parsed {
            ApiResponse { ok: true, result: Some(result), .. } => Ok(result),
            ApiResponse { description, error_code, .. } => Err(NotifyError::Api {
                code: error_code.or_else(|| (!status.is_success()).then(|| i64::from(status.as_u16()))),
                description: description.unwrap_or_else(|| "response without result".to_string()),
            }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send(&self, recipient_id: i64, text: &str) -> Result<(), NotifyError> {
        self.send_message(recipient_id, text).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_embeds_token() {
        let client = TelegramClient::with_base_url("123:abc".into(), "http://localhost:1/").unwrap();
        assert_eq!(client.method_url("sendMessage"), "http://localhost:1/bot123:abc/sendMessage");
    }

    #[test]
    fn debug_output_hides_token() {
        let client = TelegramClient::new("123:secret".into()).unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn update_parses_text_message() {
        let json = r#"{"update_id": 7, "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "/weather"}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 7);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/weather"));
    }
}
