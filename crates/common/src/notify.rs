use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::WatchResult;

/// A notification channel (Telegram, email, ...). Implementations perform a
/// single outbound call with a fixed timeout and report failure as an error
/// value; retry policy is deliberately out of scope.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> WatchResult<()>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Fan-out over every configured channel. Delivery is best-effort: a failing
/// channel is logged and counted, never escalated.
#[derive(Default)]
pub struct NotifierSet {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    pub fn push(&mut self, notifier: Arc<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    pub fn channels(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    pub async fn send_all(&self, subject: &str, body: &str) -> DeliveryReport {
        let mut tasks = JoinSet::new();

        for notifier in &self.notifiers {
            let notifier = Arc::clone(notifier);
            let subject = subject.to_string();
            let body = body.to_string();
            tasks.spawn(async move {
                match notifier.send(&subject, &body).await {
                    Ok(()) => {
                        info!("{} delivered", notifier.name());
                        true
                    }
                    Err(e) => {
                        warn!("{} failed: {}", notifier.name(), e);
                        false
                    }
                }
            });
        }

        let mut report = DeliveryReport::default();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(true) => report.delivered += 1,
                Ok(false) | Err(_) => report.failed += 1,
            }
        }
        report
    }
}
