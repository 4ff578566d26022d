use std::time::Duration;

use common::{WatchError, WatchResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Google Apps Script mail webhook: a single JSON POST carrying the shared
/// secret and the message fields.
#[derive(Clone)]
pub struct WebhookMailer {
    client: reqwest::Client,
    url: String,
    secret: String,
    to: String,
}

impl WebhookMailer {
    pub fn new(url: &str, secret: &str, to: &str) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            secret: secret.to_string(),
            to: to.to_string(),
        })
    }

    pub async fn send(&self, subject: &str, text: &str, html: &str) -> WatchResult<()> {
        let payload = serde_json::json!({
            "secret": self.secret,
            "to": self.to,
            "subject": subject,
            "text": text,
            "html": html,
            "cc": "",
            "bcc": "",
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            // Apps Script error pages can be huge; keep the head.
            let body = body.chars().take(500).collect();
            Err(WatchError::Upstream { status, body })
        }
    }
}
