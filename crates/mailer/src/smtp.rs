use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use common::{WatchError, WatchResult};

/// Plain SMTP submission over STARTTLS, multipart text+html.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        pass: &str,
        from: &str,
        to: &str,
    ) -> WatchResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| WatchError::Mail(e.to_string()))?
            .port(port)
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();
        Ok(Self {
            transport,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub async fn send(&self, subject: &str, text: &str, html: &str) -> WatchResult<()> {
        let from = self
            .from
            .parse()
            .map_err(|e| WatchError::Mail(format!("bad sender address {:?}: {e}", self.from)))?;
        let to = self
            .to
            .parse()
            .map_err(|e| WatchError::Mail(format!("bad recipient address {:?}: {e}", self.to)))?;

        let builder = Message::builder().from(from).to(to).subject(subject);
        let message = if html.is_empty() {
            builder.body(text.to_string())
        } else {
            builder.multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                html.to_string(),
            ))
        }
        .map_err(|e| WatchError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| WatchError::Mail(e.to_string()))?;
        Ok(())
    }
}
