use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use common::{Notifier, WatchError, WatchResult};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client for the Telegram Bot API `sendMessage` call.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    token: String,
    chat_id: String,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str, chat_id: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            base_url: TELEGRAM_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sends a message and returns Telegram's reply as parsed JSON. The
    /// `ok: false` case is left in the payload for the caller to inspect;
    /// only transport failures and non-JSON replies become errors.
    pub async fn send_message(&self, text: &str, parse_mode: Option<&str>) -> WatchResult<Value> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let mut payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        if let Some(mode) = parse_mode {
            payload["parse_mode"] = Value::String(mode.to_string());
        }

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status().as_u16();
        match response.json::<Value>().await {
            Ok(data) => Ok(data),
            Err(_) => Err(WatchError::Upstream {
                status,
                body: "non-JSON reply from Telegram".to_string(),
            }),
        }
    }
}

/// `Notifier` wrapper that treats `ok: false` replies as delivery failure.
pub struct TelegramNotifier {
    client: TelegramClient,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, subject: &str, body: &str) -> WatchResult<()> {
        let text = if subject.is_empty() {
            body.to_string()
        } else {
            format!("{subject}\n{body}")
        };
        let reply = self.client.send_message(&text, None).await?;
        if reply.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            Ok(())
        } else {
            Err(WatchError::Api(format!("Telegram rejected message: {reply}")))
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
