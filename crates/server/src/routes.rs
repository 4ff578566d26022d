use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/scan", get(handlers::price_scan))
        .route("/news/auto", get(handlers::news_auto))
        // Both spellings shipped at some point; keep the alias.
        .route(
            "/test/telegram",
            get(handlers::test_telegram).post(handlers::test_telegram),
        )
        .route(
            "/test-telegram",
            get(handlers::test_telegram).post(handlers::test_telegram),
        )
        .route(
            "/notify",
            get(handlers::notify_query).post(handlers::notify_json),
        )
        .route("/alerts/test", get(handlers::alerts_test))
        .route("/alerts/run", get(handlers::alerts_run))
        .route(
            "/test/email",
            get(handlers::test_email).post(handlers::test_email),
        )
        .route(
            "/email/test",
            get(handlers::test_email).post(handlers::test_email),
        )
        .with_state(state)
}
