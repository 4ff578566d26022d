use std::env;

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_list(name: &str) -> Vec<String> {
    env::var(name)
        .ok()
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MarketauxConfig {
    pub api_token: Option<String>,
    pub symbols: Vec<String>,
    pub search: Option<String>,
    pub limit: usize,
}

impl Default for MarketauxConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            symbols: Vec::new(),
            search: None,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsFilterConfig {
    pub blocked_domains: Vec<String>,
    pub max_age_hours: f64,
    pub seen_capacity: usize,
    /// `None` means "use the built-in keyword set".
    pub negative_keywords: Option<Vec<String>>,
}

impl Default for NewsFilterConfig {
    fn default() -> Self {
        Self {
            blocked_domains: Vec::new(),
            max_age_hours: 48.0,
            seen_capacity: 100,
            negative_keywords: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GradingConfig {
    /// Absolute percent move for grade A, e.g. 0.5 = 0.5%.
    pub delta_a_pct: f64,
    /// Absolute percent move for grade B.
    pub delta_b_pct: f64,
    pub sentiment_strong_max: f64,
    pub sentiment_mild_max: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            delta_a_pct: 0.5,
            delta_b_pct: 0.2,
            sentiment_strong_max: -0.3,
            sentiment_mild_max: -0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwelveDataConfig {
    pub api_key: Option<String>,
    pub symbols: Vec<String>,
    pub interval: String,
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            symbols: Vec::new(),
            interval: "1h".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub alert_to: Option<String>,
    pub email_from: Option<String>,
    pub subject_prefix: String,
    pub brevo_api_key: Option<String>,
    pub resend_api_key: Option<String>,
    pub notifier_url: Option<String>,
    pub notifier_secret: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            alert_to: None,
            email_from: None,
            subject_prefix: "[newswatch]".to_string(),
            brevo_api_key: None,
            resend_api_key: None,
            notifier_url: None,
            notifier_secret: None,
            smtp: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub enabled: bool,
    pub poll_interval_secs: u64,
    pub cooldown_secs: u64,
    /// Minimum grade ("A", "B" or "C") an item must reach to be alerted on.
    pub min_grade: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval_secs: 60,
            cooldown_secs: 1800,
            min_grade: "B".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub marketaux: MarketauxConfig,
    pub news: NewsFilterConfig,
    pub grading: GradingConfig,
    pub twelvedata: TwelveDataConfig,
    pub mail: MailConfig,
    pub alerts: AlertConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let telegram = TelegramConfig {
            bot_token: env_opt("TELEGRAM_BOT_TOKEN"),
            chat_id: env_opt("TELEGRAM_CHAT_ID"),
        };

        let marketaux = MarketauxConfig {
            // Both spellings circulated in deployments; the first one wins.
            api_token: env_opt("MARKETAUX_API_TOKEN").or_else(|| env_opt("MARKETAUX_API_KEY")),
            symbols: env_list("NEWS_SYMBOLS"),
            search: env_opt("NEWS_SEARCH"),
            limit: env_parse("NEWS_LIMIT", 20),
        };

        let news = NewsFilterConfig {
            blocked_domains: env_list("NEWS_BLOCKED_DOMAINS"),
            max_age_hours: env_parse("NEWS_MAX_AGE_HOURS", 48.0),
            seen_capacity: env_parse("NEWS_SEEN_CAPACITY", 100),
            negative_keywords: {
                let list = env_list("NEWS_NEGATIVE_KEYWORDS");
                if list.is_empty() { None } else { Some(list) }
            },
        };

        let grading = GradingConfig {
            delta_a_pct: env_parse("GRADE_A_PCT", 0.5),
            delta_b_pct: env_parse("GRADE_B_PCT", 0.2),
            sentiment_strong_max: env_parse("SENTIMENT_A_MAX", -0.3),
            sentiment_mild_max: env_parse("SENTIMENT_B_MAX", -0.1),
        };

        let twelvedata = TwelveDataConfig {
            api_key: env_opt("TWELVEDATA_API_KEY"),
            symbols: {
                let scan = env_list("SCAN_SYMBOLS");
                if scan.is_empty() { marketaux.symbols.clone() } else { scan }
            },
            interval: env_opt("SCAN_INTERVAL").unwrap_or_else(|| "1h".to_string()),
        };

        let smtp = match (env_opt("SMTP_HOST"), env_opt("SMTP_USER"), env_opt("SMTP_PASS")) {
            (Some(host), Some(user), Some(pass)) => Some(SmtpConfig {
                host,
                port: env_parse("SMTP_PORT", 587),
                user,
                pass,
            }),
            _ => None,
        };

        let mail = MailConfig {
            alert_to: env_opt("ALERT_TO"),
            email_from: env_opt("EMAIL_FROM"),
            subject_prefix: env_opt("SUBJECT_PREFIX").unwrap_or_else(|| "[newswatch]".to_string()),
            brevo_api_key: env_opt("BREVO_API_KEY"),
            resend_api_key: env_opt("RESEND_API_KEY"),
            notifier_url: env_opt("NOTIFIER_URL"),
            notifier_secret: env_opt("NOTIFIER_SECRET"),
            smtp,
        };

        let alerts = AlertConfig {
            enabled: env_bool("ALERTS_ENABLED", false),
            poll_interval_secs: env_parse("POLL_INTERVAL_SECS", 60),
            cooldown_secs: env_parse("ALERT_COOLDOWN_SECS", 1800),
            min_grade: env_opt("ALERT_MIN_GRADE").unwrap_or_else(|| "B".to_string()),
        };

        let server = ServerConfig {
            host: env_opt("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_parse("PORT", 8080),
            version: env_opt("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        };

        Config {
            telegram,
            marketaux,
            news,
            grading,
            twelvedata,
            mail,
            alerts,
            server,
        }
    }
}
