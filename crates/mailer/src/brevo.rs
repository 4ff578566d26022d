use std::time::Duration;

use common::{WatchError, WatchResult};

const BREVO_API_BASE: &str = "https://api.brevo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Brevo transactional-email API (`POST /v3/smtp/email`, `api-key` header).
#[derive(Clone)]
pub struct BrevoMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    to: String,
    base_url: String,
}

impl BrevoMailer {
    pub fn new(api_key: &str, from: &str, to: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            base_url: BREVO_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn send(&self, subject: &str, text: &str, html: &str) -> WatchResult<()> {
        let url = format!("{}/v3/smtp/email", self.base_url);
        let mut payload = serde_json::json!({
            "sender": {"email": self.from, "name": "newswatch"},
            "to": [{"email": self.to}],
            "subject": subject,
        });
        if !text.is_empty() {
            payload["textContent"] = serde_json::json!(text);
        }
        if !html.is_empty() {
            payload["htmlContent"] = serde_json::json!(html);
        }

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(WatchError::Upstream { status, body })
        }
    }
}
