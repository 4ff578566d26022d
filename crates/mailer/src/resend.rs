use std::time::Duration;

use common::{WatchError, WatchResult};

const RESEND_API_BASE: &str = "https://api.resend.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Resend transactional-email API (`POST /emails`, bearer auth).
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    to: String,
    base_url: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, from: &str, to: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            base_url: RESEND_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn send(&self, subject: &str, text: &str, html: &str) -> WatchResult<()> {
        let url = format!("{}/emails", self.base_url);
        let mut payload = serde_json::json!({
            "from": self.from,
            "to": [self.to],
            "subject": subject,
        });
        if !text.is_empty() {
            payload["text"] = serde_json::json!(text);
        }
        if !html.is_empty() {
            payload["html"] = serde_json::json!(html);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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
