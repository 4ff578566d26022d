use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Fixed-interval background runner. Each tick swallows and logs its own
/// failure; the loop itself never stops until shutdown.
pub struct IntervalPoller {
    scheduler: JobScheduler,
}

impl IntervalPoller {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self { scheduler })
    }

    pub async fn add_repeating_job<F, Fut>(&mut self, period: Duration, job_fn: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        info!("scheduling repeating job every {:?}", period);

        let job_fn = Arc::new(job_fn);
        let job = Job::new_repeated_async(period, move |_uuid, _l| {
            let job_fn = job_fn.clone();
            Box::pin(async move {
                match job_fn().await {
                    Ok(()) => info!("scheduled pass completed"),
                    Err(e) => error!("scheduled pass failed: {}", e),
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        info!("shutting down poller");
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
