//! Pure news-filtering and grading helpers: URL canonicalization, domain
//! blocking, article-age checks, a bounded seen-URL cache, threshold grading
//! and the alert cooldown map. No I/O; all state is owned by the caller.

pub mod cooldown;
pub mod dedup;
pub mod filters;
pub mod grading;
pub mod normalize;

pub use cooldown::CooldownMap;
pub use dedup::RecencyCache;
pub use filters::{article_age_ok, is_blocked};
pub use grading::{grade_delta, grade_sentiment, DeltaThresholds, Grade, SentimentThresholds};
pub use normalize::normalize_url;
