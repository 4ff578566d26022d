use std::collections::HashMap;

use time::{Duration, OffsetDateTime};

/// Suppresses repeat alerts for the same composite key within a rolling
/// window. Process-memory only; keys accumulate for the process lifetime.
#[derive(Debug)]
pub struct CooldownMap {
    window: Duration,
    last_fired: HashMap<String, OffsetDateTime>,
}

impl CooldownMap {
    pub fn new(window_secs: u64) -> Self {
        Self {
            window: Duration::seconds(window_secs as i64),
            last_fired: HashMap::new(),
        }
    }

    pub fn should_fire(&self, key: &str) -> bool {
        match self.last_fired.get(key) {
            None => true,
            Some(at) => OffsetDateTime::now_utc() - *at >= self.window,
        }
    }

    pub fn mark_fired(&mut self, key: &str) {
        self.last_fired.insert(key.to_string(), OffsetDateTime::now_utc());
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fire_is_allowed() {
        let cooldowns = CooldownMap::new(3600);
        assert!(cooldowns.should_fire("AAPL:headline"));
    }

    #[test]
    fn repeat_within_window_is_suppressed() {
        let mut cooldowns = CooldownMap::new(3600);
        cooldowns.mark_fired("AAPL:headline");
        assert!(!cooldowns.should_fire("AAPL:headline"));
        assert!(cooldowns.should_fire("TSLA:other"));
    }

    #[test]
    fn zero_window_never_suppresses() {
        let mut cooldowns = CooldownMap::new(0);
        cooldowns.mark_fired("AAPL:headline");
        assert!(cooldowns.should_fire("AAPL:headline"));
    }
}
