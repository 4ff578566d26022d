use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use common::WatchError;
use telegram::TelegramClient;

use crate::error::ApiError;
use crate::scan::{run_alert_pass, run_news_scan, run_price_scan, AlertSummary, NewsScanReport, PriceScanReport};
use crate::state::AppState;

pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "service": "newswatch",
        "version": state.config.server.version,
        "status": "ok",
        "endpoints": [
            "/health", "/status", "/scan", "/news/auto",
            "/test/telegram", "/notify", "/alerts/test", "/alerts/run", "/test/email",
        ],
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "telegram_bot": state.config.telegram.bot_token.is_some(),
        "chat_id_set": state.config.telegram.chat_id.is_some(),
        "marketaux": state.marketaux.is_some(),
        "twelvedata": state.twelvedata.is_some(),
        "mail_backend": state.mailer.as_ref().map(|m| m.backend()),
    }))
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let seen = state.seen.lock().await;
    let cooldowns = state.cooldowns.lock().await;
    let config = &state.config;
    Json(json!({
        "service": "newswatch",
        "version": config.server.version,
        "uptime_sec": state.uptime_secs(),
        "alerts_enabled": config.alerts.enabled,
        "seen_cache": {"len": seen.len(), "capacity": seen.capacity()},
        "cooldown_keys": cooldowns.len(),
        "env_ok": {
            "TELEGRAM_BOT_TOKEN": config.telegram.bot_token.is_some(),
            "TELEGRAM_CHAT_ID": config.telegram.chat_id.is_some(),
            "MARKETAUX_API_TOKEN": config.marketaux.api_token.is_some(),
            "TWELVEDATA_API_KEY": config.twelvedata.api_key.is_some(),
            "ALERT_TO": config.mail.alert_to.is_some(),
            "NOTIFIER_URL": config.mail.notifier_url.is_some(),
            "NOTIFIER_SECRET": config.mail.notifier_secret.is_some(),
        },
    }))
}

fn telegram_client(state: &AppState) -> Result<&TelegramClient, ApiError> {
    state.telegram.as_ref().ok_or_else(|| {
        WatchError::MissingConfig("TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID".to_string()).into()
    })
}

pub async fn test_telegram(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let client = telegram_client(&state)?;
    let reply = client
        .send_message("Telegram connectivity OK, newswatch is up", None)
        .await?;
    let ok = reply.get("ok").and_then(Value::as_bool).unwrap_or(false);
    Ok(Json(json!({"ok": ok, "telegram_response": reply})))
}

#[derive(Deserialize)]
pub struct NotifyParams {
    text: String,
    parse_mode: Option<String>,
}

pub async fn notify_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotifyParams>,
) -> Result<Json<Value>, ApiError> {
    send_text(&state, params).await
}

pub async fn notify_json(
    State(state): State<Arc<AppState>>,
    Json(params): Json<NotifyParams>,
) -> Result<Json<Value>, ApiError> {
    send_text(&state, params).await
}

async fn send_text(state: &AppState, params: NotifyParams) -> Result<Json<Value>, ApiError> {
    if params.text.trim().is_empty() {
        return Err(WatchError::InvalidRequest("text must not be empty".to_string()).into());
    }
    let client = telegram_client(state)?;
    let reply = client
        .send_message(&params.text, params.parse_mode.as_deref())
        .await?;
    let ok = reply.get("ok").and_then(Value::as_bool).unwrap_or(false);
    Ok(Json(json!({"ok": ok, "telegram_response": reply})))
}

pub async fn news_auto(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewsScanReport>, ApiError> {
    Ok(Json(run_news_scan(&state, true).await?))
}

pub async fn price_scan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PriceScanReport>, ApiError> {
    Ok(Json(run_price_scan(&state, false).await?))
}

pub async fn alerts_run(State(state): State<Arc<AppState>>) -> Json<AlertSummary> {
    Json(run_alert_pass(&state).await)
}

pub async fn alerts_test(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let notifiers = state.notifier_set();
    if notifiers.is_empty() {
        return Err(
            WatchError::MissingConfig("no notification channel configured".to_string()).into(),
        );
    }
    let subject = format!("{} test alert", state.config.mail.subject_prefix);
    let report = notifiers
        .send_all(&subject, "Test alert from newswatch.")
        .await;
    Ok(Json(json!({
        "ok": report.failed == 0,
        "channels": notifiers.channels(),
        "delivered": report.delivered,
        "failed": report.failed,
    })))
}

pub async fn test_email(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mailer = state.mailer.as_ref().ok_or_else(|| {
        WatchError::MissingConfig(
            "BREVO_API_KEY / RESEND_API_KEY / NOTIFIER_URL / SMTP_HOST".to_string(),
        )
    })?;
    let subject = format!("{} email test", state.config.mail.subject_prefix);
    mailer
        .send(
            &subject,
            "The mail pipeline is configured and reachable.",
            "<p>The mail pipeline is configured and reachable.</p>",
        )
        .await?;
    Ok(Json(json!({"ok": true, "backend": mailer.backend()})))
}
