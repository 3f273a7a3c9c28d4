//! Trend list state with a per-industry session cache.
//!
//! Each industry's topic list is fetched once per session and kept; cycling
//! back to a cached industry displays it without a refetch unless forced
//! (explicit refresh, or the combined post-login load). A response that
//! arrives after the operator moved to another industry still lands in the
//! cache, it just isn't displayed.

use std::collections::HashMap;

use crate::models::Trend;

/// Industry categories offered by the backend, as `(key, label)`.
pub const INDUSTRIES: [(&str, &str); 9] = [
    ("top", "India"),
    ("world", "World"),
    ("local", "Local"),
    ("business", "Business"),
    ("technology", "Technology"),
    ("entertainment", "Entertainment"),
    ("sports", "Sports"),
    ("science", "Science"),
    ("health", "Health"),
];

/// Page size requested from the trending-topics endpoint.
pub const TRENDS_PAGE_SIZE: u32 = 10;

/// Current industry, displayed topics, and the per-industry cache.
#[derive(Debug, Clone, Default)]
pub struct TrendsState {
    industry_idx: usize,
    pub topics: Vec<Trend>,
    cache: HashMap<String, Vec<Trend>>,
    /// True while a fetch for the current industry is outstanding.
    pub loading: bool,
    /// Cursor into the topic list.
    pub cursor: usize,
}

impl TrendsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn industry_key(&self) -> &'static str {
        INDUSTRIES[self.industry_idx].0
    }

    pub fn industry_label(&self) -> &'static str {
        INDUSTRIES[self.industry_idx].1
    }

    /// Step to the next/previous industry. A cached industry displays
    /// immediately; an uncached one needs a fetch (the caller kicks it
    /// off). Returns the new key.
    pub fn cycle_industry(&mut self, forward: bool) -> &'static str {
        let len = INDUSTRIES.len();
        self.industry_idx = if forward {
            (self.industry_idx + 1) % len
        } else {
            (self.industry_idx + len - 1) % len
        };
        self.cursor = 0;
        if let Some(cached) = self.cache.get(self.industry_key()) {
            self.topics = cached.clone();
            self.loading = false;
        }
        self.industry_key()
    }

    /// Whether a fetch is needed for `industry` given the session cache.
    pub fn needs_fetch(&self, industry: &str, force: bool) -> bool {
        force || !self.cache.contains_key(industry)
    }

    /// Record a successful load. Always cached; displayed (wholesale
    /// replacement) only when the industry is still the active one.
    pub fn store(&mut self, industry: &str, topics: Vec<Trend>) {
        self.cache.insert(industry.to_string(), topics.clone());
        if industry == self.industry_key() {
            self.topics = topics;
            self.loading = false;
            if self.cursor >= self.topics.len() {
                self.cursor = self.topics.len().saturating_sub(1);
            }
        }
    }

    /// A load failed: never cached, so re-entry retries. The empty list is
    /// shown when the failure concerns the current industry.
    pub fn store_failure(&mut self, industry: &str) {
        if industry == self.industry_key() {
            self.topics.clear();
            self.loading = false;
            self.cursor = 0;
        }
    }

    pub fn selected(&self) -> Option<&Trend> {
        self.topics.get(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.topics.len() {
            self.cursor += 1;
        }
    }

    /// Full reset (logout).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(topic: &str) -> Trend {
        Trend {
            topic: topic.to_string(),
            image: None,
            source: None,
        }
    }

    #[test]
    fn fresh_state_needs_fetch() {
        let state = TrendsState::new();
        assert_eq!(state.industry_key(), "top");
        assert!(state.needs_fetch("top", false));
    }

    #[test]
    fn loaded_industry_is_cached_until_forced() {
        let mut state = TrendsState::new();
        state.store("top", vec![trend("a")]);
        assert!(!state.needs_fetch("top", false));
        assert!(state.needs_fetch("top", true));
        assert!(state.needs_fetch("world", false));
    }

    #[test]
    fn failure_does_not_mark_loaded() {
        let mut state = TrendsState::new();
        state.loading = true;
        state.store_failure("top");
        assert!(state.topics.is_empty());
        assert!(!state.loading);
        assert!(state.needs_fetch("top", false));
    }

    #[test]
    fn failure_for_departed_industry_keeps_display() {
        let mut state = TrendsState::new();
        state.store("top", vec![trend("a")]);
        state.store_failure("health");
        assert_eq!(state.topics.len(), 1);
    }

    #[test]
    fn store_replaces_wholesale_and_clamps_cursor() {
        let mut state = TrendsState::new();
        state.store("top", vec![trend("a"), trend("b"), trend("c")]);
        state.cursor = 2;
        state.store("top", vec![trend("x")]);
        assert_eq!(state.topics.len(), 1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn departed_industry_response_lands_in_cache_only() {
        let mut state = TrendsState::new();
        // Response for "health" arrives while "top" is displayed.
        state.store("health", vec![trend("x")]);
        assert!(state.topics.is_empty());
        assert!(!state.needs_fetch("health", false));
    }

    #[test]
    fn cycling_to_cached_industry_restores_topics() {
        let mut state = TrendsState::new();
        state.store("top", vec![trend("a")]);
        state.store("world", vec![trend("w1"), trend("w2")]);

        assert_eq!(state.cycle_industry(true), "world");
        assert_eq!(state.topics.len(), 2);
        assert_eq!(state.cycle_industry(false), "top");
        assert_eq!(state.topics.len(), 1);
    }

    #[test]
    fn cycle_industry_wraps_both_ways() {
        let mut state = TrendsState::new();
        assert_eq!(state.cycle_industry(false), "health");
        assert_eq!(state.cycle_industry(true), "top");
        assert_eq!(state.cycle_industry(true), "world");
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut state = TrendsState::new();
        state.store("top", vec![trend("a"), trend("b")]);
        state.cursor_up();
        assert_eq!(state.cursor, 0);
        state.cursor_down();
        assert_eq!(state.cursor, 1);
        state.cursor_down();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selected().unwrap().topic, "b");
    }
}
