use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("mail delivery failed: {0}")]
    Mail(String),

    #[error("configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WatchResult<T> = Result<T, WatchError>;
