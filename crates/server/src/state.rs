use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use common::{Config, NotifierSet, WatchResult};
use mailer::Mailer;
use marketaux::MarketauxClient;
use newsflow::{CooldownMap, DeltaThresholds, Grade, RecencyCache, SentimentThresholds};
use telegram::{TelegramClient, TelegramNotifier};
use twelvedata::TwelveDataClient;

/// Shared per-process state. The recency cache and cooldown map are the only
/// mutable pieces; both sit behind a mutex because request handlers and the
/// background alert loop touch them.
pub struct AppState {
    pub config: Config,
    pub started_at: Instant,
    pub telegram: Option<TelegramClient>,
    pub marketaux: Option<MarketauxClient>,
    pub twelvedata: Option<TwelveDataClient>,
    pub mailer: Option<Mailer>,
    pub seen: Mutex<RecencyCache>,
    pub cooldowns: Mutex<CooldownMap>,
}

impl AppState {
    pub fn from_config(config: Config) -> WatchResult<Self> {
        let telegram = match (&config.telegram.bot_token, &config.telegram.chat_id) {
            (Some(token), Some(chat_id)) => Some(TelegramClient::new(token, chat_id)?),
            _ => None,
        };
        let marketaux = config
            .marketaux
            .api_token
            .as_deref()
            .map(MarketauxClient::new)
            .transpose()?;
        let twelvedata = config
            .twelvedata
            .api_key
            .as_deref()
            .map(TwelveDataClient::new)
            .transpose()?;
        let mailer = Mailer::from_config(&config.mail)?;
        let seen = Mutex::new(RecencyCache::new(config.news.seen_capacity));
        let cooldowns = Mutex::new(CooldownMap::new(config.alerts.cooldown_secs));

        Ok(Self {
            config,
            started_at: Instant::now(),
            telegram,
            marketaux,
            twelvedata,
            mailer,
            seen,
            cooldowns,
        })
    }

    /// Every configured notification channel, freshly assembled; clients are
    /// cheap clones over shared connection pools.
    pub fn notifier_set(&self) -> NotifierSet {
        let mut set = NotifierSet::new();
        if let Some(client) = &self.telegram {
            set.push(Arc::new(TelegramNotifier::new(client.clone())));
        }
        if let Some(mailer) = &self.mailer {
            set.push(Arc::new(mailer.clone()));
        }
        set
    }

    pub fn alert_min_grade(&self) -> Grade {
        self.config.alerts.min_grade.parse().unwrap_or(Grade::B)
    }

    pub fn delta_thresholds(&self) -> DeltaThresholds {
        DeltaThresholds {
            a_pct: self.config.grading.delta_a_pct,
            b_pct: self.config.grading.delta_b_pct,
        }
    }

    pub fn sentiment_thresholds(&self) -> SentimentThresholds {
        let mut thresholds = SentimentThresholds {
            strong_max: self.config.grading.sentiment_strong_max,
            mild_max: self.config.grading.sentiment_mild_max,
            ..Default::default()
        };
        if let Some(keywords) = &self.config.news.negative_keywords {
            thresholds.keywords = keywords.clone();
        }
        thresholds
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
