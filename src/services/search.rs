use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clients::{SearchProvider, WebHit};
use crate::services::search_cache::{CacheKey, SearchCache};

/// Longest title or snippet kept, in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Title of the single item returned when the provider call fails.
pub const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    #[must_use]
    pub fn from_hit(hit: WebHit) -> Self {
        Self {
            title: sanitize_text(&hit.title),
            url: hit.href,
            snippet: sanitize_text(&hit.body),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            url: String::new(),
            snippet: message.into(),
        }
    }
}

/// Collapses every run of non-ASCII characters into one space, trims, and
/// caps the result at [`MAX_TEXT_LEN`] characters.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.chars() {
        if c.is_ascii() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }

    out.trim().chars().take(MAX_TEXT_LEN).collect()
}

pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    cache: Arc<SearchCache>,
}

impl SearchService {
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>, cache: Arc<SearchCache>) -> Self {
        Self { provider, cache }
    }

    /// Searches the web for `topic`, returning at most `max_results` items.
    ///
    /// Never fails: a provider error comes back as a single [`ERROR_TITLE`]
    /// item carrying the error text, and is not cached.
    pub async fn search(&self, topic: &str, max_results: usize) -> Vec<SearchResult> {
        let key = CacheKey::new(topic, max_results);

        if let Some(cached) = self.cache.get(&key).await {
            metrics::counter!("search_cache_hits_total").increment(1);
            debug!("Search cache hit for '{}' ({})", key.topic, max_results);
            return cached;
        }

        metrics::counter!("search_cache_misses_total").increment(1);

        match self.provider.search(topic.trim(), max_results).await {
            Ok(hits) => {
                let results: Vec<SearchResult> = hits
                    .into_iter()
                    .take(max_results)
                    .map(SearchResult::from_hit)
                    .collect();

                debug!(
                    "{} returned {} result(s) for '{}'",
                    self.provider.name(),
                    results.len(),
                    key.topic
                );

                self.cache.insert(key, results).await
            }
            Err(e) => {
                metrics::counter!("search_provider_errors_total").increment(1);
                warn!(
                    provider = self.provider.name(),
                    topic = %key.topic,
                    error = %e,
                    "Web search failed"
                );
                vec![SearchResult::error(format!("{e:#}"))]
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns `n` numbered hits per call and counts calls.
    pub(crate) struct CountingProvider {
        pub calls: AtomicUsize,
        pub fail: bool,
    }

    impl CountingProvider {
        pub(crate) fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SearchProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<WebHit>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("provider unavailable");
            }
            // One more than asked, to check the service enforces the limit itself.
            Ok((0..=max_results)
                .map(|i| WebHit {
                    title: format!("{query} #{i}"),
                    href: format!("https://example.com/{i}"),
                    body: format!("about {query}"),
                })
                .collect())
        }
    }

    fn service(provider: Arc<CountingProvider>, capacity: usize) -> SearchService {
        SearchService::new(provider, Arc::new(SearchCache::new(capacity)))
    }

    #[test]
    fn test_sanitize_strips_non_ascii() {
        assert_eq!(sanitize_text("Merge sort 🚀 explained"), "Merge sort   explained");
        assert_eq!(sanitize_text("café"), "caf");
        assert_eq!(sanitize_text("日本語 title"), "title");
        assert_eq!(sanitize_text(""), "");
        assert!(sanitize_text("a\u{00e9}\u{00e8}b").is_ascii());
    }

    #[test]
    fn test_sanitize_collapses_runs_into_one_space() {
        assert_eq!(sanitize_text("a🎉🎉🎉b"), "a b");
    }

    #[test]
    fn test_sanitize_truncates_to_limit() {
        let long = format!("{}✨{}", "x".repeat(400), "y".repeat(400));
        let cleaned = sanitize_text(&long);
        assert_eq!(cleaned.chars().count(), MAX_TEXT_LEN);
        assert!(cleaned.is_ascii());
        assert!(cleaned.starts_with(&"x".repeat(400)));
    }

    #[tokio::test]
    async fn test_search_limits_results_and_sanitizes() {
        let provider = Arc::new(CountingProvider::new());
        let svc = service(provider.clone(), 200);

        let results = svc.search("merge sort", 5).await;

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].title, "merge sort #0");
        assert_eq!(results[0].url, "https://example.com/0");
        assert_eq!(results[0].snippet, "about merge sort");
    }

    #[tokio::test]
    async fn test_repeated_search_is_served_from_cache() {
        let provider = Arc::new(CountingProvider::new());
        let svc = service(provider.clone(), 200);

        let first = svc.search("merge sort", 5).await;
        let second = svc.search("  MERGE sort ", 5).await;

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(provider.calls(), 1);

        svc.search("merge sort", 3).await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_yields_sentinel_and_is_not_cached() {
        let provider = Arc::new(CountingProvider::failing());
        let cache = Arc::new(SearchCache::new(200));
        let svc = SearchService::new(provider.clone(), cache.clone());

        let results = svc.search("anything", 5).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, ERROR_TITLE);
        assert_eq!(results[0].url, "");
        assert!(results[0].snippet.contains("provider unavailable"));

        svc.search("anything", 5).await;
        assert_eq!(provider.calls(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_full_cache_keeps_calling_provider_for_new_topics() {
        let provider = Arc::new(CountingProvider::new());
        let cache = Arc::new(SearchCache::new(1));
        let svc = SearchService::new(provider.clone(), cache.clone());

        svc.search("first", 1).await;
        svc.search("second", 1).await;
        svc.search("second", 1).await;
        svc.search("first", 1).await;

        assert_eq!(provider.calls(), 3);
        assert_eq!(cache.len().await, 1);
    }
}
