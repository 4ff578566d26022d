//! Transactional email behind one `Mailer` value. Exactly one backend is
//! active per process, chosen from configuration.

mod brevo;
mod resend;
mod smtp;
mod webhook;

use async_trait::async_trait;

pub use brevo::BrevoMailer;
pub use resend::ResendMailer;
pub use smtp::SmtpMailer;
pub use webhook::WebhookMailer;

use common::config::MailConfig;
use common::{Notifier, WatchResult};

#[derive(Clone)]
pub enum Mailer {
    Brevo(BrevoMailer),
    Resend(ResendMailer),
    Webhook(WebhookMailer),
    Smtp(SmtpMailer),
}

impl Mailer {
    /// First configured backend wins: Brevo, then Resend, then the Apps
    /// Script webhook, then SMTP. `Ok(None)` when nothing is configured.
    pub fn from_config(config: &MailConfig) -> WatchResult<Option<Mailer>> {
        let to = config.alert_to.as_deref();
        let from = config.email_from.as_deref();

        if let (Some(key), Some(from), Some(to)) = (config.brevo_api_key.as_deref(), from, to) {
            return Ok(Some(Mailer::Brevo(BrevoMailer::new(key, from, to)?)));
        }
        if let (Some(key), Some(from), Some(to)) = (config.resend_api_key.as_deref(), from, to) {
            return Ok(Some(Mailer::Resend(ResendMailer::new(key, from, to)?)));
        }
        if let (Some(url), Some(secret), Some(to)) = (
            config.notifier_url.as_deref(),
            config.notifier_secret.as_deref(),
            to,
        ) {
            return Ok(Some(Mailer::Webhook(WebhookMailer::new(url, secret, to)?)));
        }
        if let (Some(smtp), Some(to)) = (config.smtp.as_ref(), to) {
            let from = from.unwrap_or(smtp.user.as_str());
            return Ok(Some(Mailer::Smtp(SmtpMailer::new(
                &smtp.host, smtp.port, &smtp.user, &smtp.pass, from, to,
            )?)));
        }
        Ok(None)
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Mailer::Brevo(_) => "brevo",
            Mailer::Resend(_) => "resend",
            Mailer::Webhook(_) => "webhook",
            Mailer::Smtp(_) => "smtp",
        }
    }

    pub async fn send(&self, subject: &str, text: &str, html: &str) -> WatchResult<()> {
        match self {
            Mailer::Brevo(m) => m.send(subject, text, html).await,
            Mailer::Resend(m) => m.send(subject, text, html).await,
            Mailer::Webhook(m) => m.send(subject, text, html).await,
            Mailer::Smtp(m) => m.send(subject, text, html).await,
        }
    }
}

#[async_trait]
impl Notifier for Mailer {
    async fn send(&self, subject: &str, body: &str) -> WatchResult<()> {
        Mailer::send(self, subject, body, "").await
    }

    fn name(&self) -> &'static str {
        self.backend()
    }
}
