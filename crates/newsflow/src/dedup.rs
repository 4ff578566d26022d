use std::collections::{HashSet, VecDeque};

use crate::normalize::normalize_url;

/// Bounded recency cache of normalized article URLs.
///
/// Insertion order lives in the deque, membership in the set; eviction keeps
/// the two exactly in sync (the set always equals the deque contents). Not
/// internally synchronized — callers that share it wrap it in a mutex.
#[derive(Debug)]
pub struct RecencyCache {
    capacity: usize,
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl RecencyCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn is_seen(&self, url: &str) -> bool {
        self.seen.contains(&normalize_url(url))
    }

    /// Records a URL. No-op when normalization yields an empty string or the
    /// URL is already present; evicts the oldest entry past capacity.
    pub fn mark_seen(&mut self, url: &str) {
        let key = normalize_url(url);
        if key.is_empty() || self.seen.contains(&key) {
            return;
        }
        self.order.push_back(key.clone());
        self.seen.insert(key);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marked_urls_are_seen() {
        let mut cache = RecencyCache::new(10);
        assert!(!cache.is_seen("https://example.com/a"));
        cache.mark_seen("https://example.com/a");
        assert!(cache.is_seen("https://example.com/a"));
    }

    #[test]
    fn membership_is_keyed_on_the_normalized_form() {
        let mut cache = RecencyCache::new(10);
        cache.mark_seen("https://Example.com/a?id=2#frag");
        assert!(cache.is_seen("https://example.com/a"));
    }

    #[test]
    fn duplicate_marks_do_not_grow_the_cache() {
        let mut cache = RecencyCache::new(10);
        cache.mark_seen("https://example.com/a");
        cache.mark_seen("https://example.com/a?ref=tw");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_normalization_is_a_noop() {
        let mut cache = RecencyCache::new(10);
        cache.mark_seen("   ");
        assert!(cache.is_empty());
    }

    #[test]
    fn oldest_entry_is_evicted_past_capacity() {
        let mut cache = RecencyCache::new(100);
        for i in 0..101 {
            cache.mark_seen(&format!("https://example.com/story/{i}"));
        }
        assert_eq!(cache.len(), 100);
        assert!(!cache.is_seen("https://example.com/story/0"));
        assert!(cache.is_seen("https://example.com/story/1"));
        assert!(cache.is_seen("https://example.com/story/100"));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut cache = RecencyCache::new(0);
        cache.mark_seen("https://example.com/a");
        cache.mark_seen("https://example.com/b");
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_seen("https://example.com/a"));
        assert!(cache.is_seen("https://example.com/b"));
    }
}
