use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// True if the URL's host ends with any of the blocked suffixes.
/// An empty block-list blocks nothing; an unparsable URL is never blocked.
pub fn is_blocked(url: &str, blocked_domains: &[String]) -> bool {
    if blocked_domains.is_empty() {
        return false;
    }
    let host = match Url::parse(url.trim()) {
        Ok(parsed) => match parsed.host_str() {
            Some(h) => h.to_ascii_lowercase(),
            None => return false,
        },
        Err(_) => return false,
    };
    blocked_domains.iter().any(|suffix| {
        let suffix = suffix.trim().to_ascii_lowercase();
        !suffix.is_empty() && host.ends_with(&suffix)
    })
}

fn parse_published_at(raw: &str) -> Option<OffsetDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(ts);
    }
    // Some feeds send a bare timestamp without offset; treat it as UTC.
    let bare = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    PrimitiveDateTime::parse(s, bare).ok().map(|p| p.assume_utc())
}

/// Accepts an article unless it is verifiably older than `max_age_hours`.
/// An unparsable timestamp passes: dropping oddly-formatted but valid
/// articles is worse than letting a stale one through.
pub fn article_age_ok(published_at: &str, max_age_hours: f64) -> bool {
    age_ok_at(published_at, max_age_hours, OffsetDateTime::now_utc())
}

fn age_ok_at(published_at: &str, max_age_hours: f64, now: OffsetDateTime) -> bool {
    match parse_published_at(published_at) {
        None => true,
        Some(ts) => (now - ts).as_seconds_f64() / 3600.0 <= max_age_hours,
    }
}
