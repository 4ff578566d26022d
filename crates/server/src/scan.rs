use serde::Serialize;
use tracing::{info, warn};

use common::{WatchError, WatchResult};
use marketaux::NewsItem;
use newsflow::{
    article_age_ok, grade_delta, grade_sentiment, is_blocked, normalize_url, Grade, RecencyCache,
    SentimentThresholds,
};

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct GradedItem {
    #[serde(flatten)]
    pub item: NewsItem,
    pub grade: Option<Grade>,
    pub normalized_url: String,
}

#[derive(Debug, Default, Serialize)]
pub struct NewsScanReport {
    pub fetched: usize,
    pub blocked: usize,
    pub stale: usize,
    pub duplicates: usize,
    pub alerts_sent: usize,
    pub items: Vec<GradedItem>,
}

/// The filter chain: block-list, age, de-dup, then sentiment grading.
/// Survivors are marked seen immediately so a second pass in the same
/// process reports them as duplicates.
fn sift_items(
    items: Vec<NewsItem>,
    blocked_domains: &[String],
    max_age_hours: f64,
    thresholds: &SentimentThresholds,
    seen: &mut RecencyCache,
) -> NewsScanReport {
    let mut report = NewsScanReport {
        fetched: items.len(),
        ..Default::default()
    };
    for item in items {
        let normalized = normalize_url(&item.url);
        if is_blocked(&normalized, blocked_domains) {
            report.blocked += 1;
            continue;
        }
        if !article_age_ok(&item.published_at, max_age_hours) {
            report.stale += 1;
            continue;
        }
        if seen.is_seen(&normalized) {
            report.duplicates += 1;
            continue;
        }
        seen.mark_seen(&normalized);
        let grade = grade_sentiment(
            item.sentiment,
            &format!("{} {}", item.title, item.snippet),
            thresholds,
        );
        report.items.push(GradedItem {
            item,
            grade,
            normalized_url: normalized,
        });
    }
    report
}

pub async fn run_news_scan(state: &AppState, notify: bool) -> WatchResult<NewsScanReport> {
    let client = state
        .marketaux
        .as_ref()
        .ok_or_else(|| WatchError::MissingConfig("MARKETAUX_API_TOKEN".to_string()))?;
    let cfg = &state.config;

    let fetched = client
        .latest_news(
            &cfg.marketaux.symbols,
            cfg.marketaux.search.as_deref(),
            cfg.marketaux.limit,
        )
        .await?;
    let thresholds = state.sentiment_thresholds();

    let mut report = {
        let mut seen = state.seen.lock().await;
        sift_items(
            fetched,
            &cfg.news.blocked_domains,
            cfg.news.max_age_hours,
            &thresholds,
            &mut seen,
        )
    };
    info!(
        "news scan: fetched {}, blocked {}, stale {}, duplicates {}, kept {}",
        report.fetched,
        report.blocked,
        report.stale,
        report.duplicates,
        report.items.len()
    );

    if notify {
        report.alerts_sent = notify_news_items(state, &report.items).await;
    }
    Ok(report)
}

async fn notify_news_items(state: &AppState, items: &[GradedItem]) -> usize {
    let notifiers = state.notifier_set();
    if notifiers.is_empty() {
        return 0;
    }
    let min_grade = state.alert_min_grade();
    let prefix = &state.config.mail.subject_prefix;
    let mut sent = 0;

    for graded in items {
        let Some(grade) = graded.grade else { continue };
        if grade < min_grade {
            continue;
        }
        let symbol = graded
            .item
            .symbols
            .first()
            .map(String::as_str)
            .unwrap_or("news");
        let key = format!("{symbol}:{}", graded.item.title);
        {
            let mut cooldowns = state.cooldowns.lock().await;
            if !cooldowns.should_fire(&key) {
                continue;
            }
            cooldowns.mark_fired(&key);
        }
        let subject = format!("{prefix} [{grade}] {}", graded.item.title);
        let body = format!(
            "{}\n{}\nsource: {} | published: {}",
            graded.item.title, graded.item.url, graded.item.source, graded.item.published_at
        );
        let delivery = notifiers.send_all(&subject, &body).await;
        if delivery.delivered > 0 {
            sent += 1;
        }
    }
    sent
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceGrade {
    pub symbol: String,
    pub interval: String,
    pub change_pct: f64,
    pub grade: Grade,
}

#[derive(Debug, Default, Serialize)]
pub struct PriceScanReport {
    pub scanned: usize,
    pub failed: usize,
    pub alerts_sent: usize,
    pub results: Vec<PriceGrade>,
}

pub async fn run_price_scan(state: &AppState, notify: bool) -> WatchResult<PriceScanReport> {
    let client = state
        .twelvedata
        .as_ref()
        .ok_or_else(|| WatchError::MissingConfig("TWELVEDATA_API_KEY".to_string()))?;
    let cfg = &state.config.twelvedata;
    if cfg.symbols.is_empty() {
        return Err(WatchError::MissingConfig(
            "SCAN_SYMBOLS / NEWS_SYMBOLS".to_string(),
        ));
    }
    let thresholds = state.delta_thresholds();
    let mut report = PriceScanReport::default();

    for symbol in &cfg.symbols {
        report.scanned += 1;
        match client.percent_change(symbol, &cfg.interval).await {
            Ok(change) => {
                let grade = grade_delta(change, &thresholds);
                report.results.push(PriceGrade {
                    symbol: symbol.clone(),
                    interval: cfg.interval.clone(),
                    change_pct: change * 100.0,
                    grade,
                });
            }
            Err(e) => {
                warn!("price scan failed for {}: {}", symbol, e);
                report.failed += 1;
            }
        }
    }

    if notify {
        report.alerts_sent = notify_price_moves(state, &report.results).await;
    }
    Ok(report)
}

async fn notify_price_moves(state: &AppState, results: &[PriceGrade]) -> usize {
    let notifiers = state.notifier_set();
    if notifiers.is_empty() {
        return 0;
    }
    let min_grade = state.alert_min_grade();
    let prefix = &state.config.mail.subject_prefix;
    let mut sent = 0;

    for result in results {
        if result.grade < min_grade {
            continue;
        }
        let key = format!("{}:{}:{}", result.symbol, result.interval, result.grade);
        {
            let mut cooldowns = state.cooldowns.lock().await;
            if !cooldowns.should_fire(&key) {
                continue;
            }
            cooldowns.mark_fired(&key);
        }
        let subject = format!(
            "{prefix} [{}] {} moved {:+.2}%",
            result.grade, result.symbol, result.change_pct
        );
        let body = format!(
            "{} changed {:+.2}% over the last {} bar",
            result.symbol, result.change_pct, result.interval
        );
        let delivery = notifiers.send_all(&subject, &body).await;
        if delivery.delivered > 0 {
            sent += 1;
        }
    }
    sent
}

#[derive(Debug, Default, Serialize)]
pub struct AlertSummary {
    pub news: Option<NewsScanReport>,
    pub news_error: Option<String>,
    pub prices: Option<PriceScanReport>,
    pub price_error: Option<String>,
}

/// One full alert pass over both sources. Unconfigured sides are skipped and
/// failures are reported in the summary, never propagated: this is the body
/// of the background loop and must not take it down.
pub async fn run_alert_pass(state: &AppState) -> AlertSummary {
    let mut summary = AlertSummary::default();

    match run_news_scan(state, true).await {
        Ok(report) => summary.news = Some(report),
        Err(WatchError::MissingConfig(var)) => info!("news scan skipped, {} not set", var),
        Err(e) => {
            warn!("news scan failed: {}", e);
            summary.news_error = Some(e.to_string());
        }
    }

    match run_price_scan(state, true).await {
        Ok(report) => summary.prices = Some(report),
        Err(WatchError::MissingConfig(var)) => info!("price scan skipped, {} not set", var),
        Err(e) => {
            warn!("price scan failed: {}", e);
            summary.price_error = Some(e.to_string());
        }
    }

    summary
}
