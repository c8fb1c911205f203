//! In-process memo of search results keyed by (topic, result count).
//!
//! Entries live for the whole process. Once `capacity` distinct keys are
//! stored, further inserts are dropped; nothing is ever evicted.

use std::collections::HashMap;
use tokio::sync::Mutex;

use super::search::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub topic: String,
    pub max_results: usize,
}

impl CacheKey {
    /// Topics are matched case-insensitively and ignoring surrounding whitespace.
    #[must_use]
    pub fn new(topic: &str, max_results: usize) -> Self {
        Self {
            topic: topic.trim().to_lowercase(),
            max_results,
        }
    }
}

pub struct SearchCache {
    entries: Mutex<HashMap<CacheKey, Vec<SearchResult>>>,
    capacity: usize,
}

impl SearchCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<Vec<SearchResult>> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Stores `results` unless the key is already present or the cache is full.
    ///
    /// Returns what is cached for the key afterwards: the earlier value when
    /// another caller got there first, `results` when it was stored, or
    /// `results` unchanged when the cache was full.
    pub async fn insert(&self, key: CacheKey, results: Vec<SearchResult>) -> Vec<SearchResult> {
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries.get(&key) {
            return existing.clone();
        }

        if entries.len() < self.capacity {
            entries.insert(key, results.clone());
        }

        results
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
