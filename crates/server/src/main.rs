mod error;
mod handlers;
mod poller;
mod routes;
mod scan;
mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use common::Config;

use poller::IntervalPoller;
use scan::run_alert_pass;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env();
    let state = Arc::new(AppState::from_config(config)?);
    info!("newswatch {} starting up", state.config.server.version);

    let mut poller = None;
    if state.config.alerts.enabled {
        let period = Duration::from_secs(state.config.alerts.poll_interval_secs.max(1));
        let mut p = IntervalPoller::new().await?;
        let job_state = state.clone();
        p.add_repeating_job(period, move || {
            let state = job_state.clone();
            async move {
                run_alert_pass(&state).await;
                Ok(())
            }
        })
        .await?;
        p.start().await?;
        info!("alert loop enabled, period {:?}", period);
        poller = Some(p);
    }

    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    let app = routes::router(state);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received interrupt signal, shutting down");
            if let Some(p) = poller.as_mut() {
                p.shutdown().await?;
            }
        }
    }

    Ok(())
}
