use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::services::search::{SearchResult, SearchService};

/// A search result tagged with the topic that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookshelfResource {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub topic: String,
}

impl BookshelfResource {
    #[must_use]
    pub fn tagged(result: SearchResult, topic: &str) -> Self {
        Self {
            title: result.title,
            url: result.url,
            snippet: result.snippet,
            topic: topic.to_string(),
        }
    }
}

/// Splits a comma-separated topic list, dropping blank entries.
#[must_use]
pub fn split_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct BookshelfService {
    search: Arc<SearchService>,
}

impl BookshelfService {
    #[must_use]
    pub const fn new(search: Arc<SearchService>) -> Self {
        Self { search }
    }

    /// Runs one search per non-blank topic and concatenates the results in
    /// topic order. Duplicates across topics are kept.
    pub async fn resources(&self, topics: &[String], per_topic: usize) -> Vec<BookshelfResource> {
        let mut resources = Vec::new();

        for topic in topics.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            let results = self.search.search(topic, per_topic).await;
            resources.extend(
                results
                    .into_iter()
                    .map(|r| BookshelfResource::tagged(r, topic)),
            );
        }

        debug!(
            "Bookshelf built {} resource(s) from {} topic(s)",
            resources.len(),
            topics.len()
        );

        resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::search::tests::CountingProvider;
    use crate::services::search_cache::SearchCache;

    fn bookshelf(provider: Arc<CountingProvider>) -> BookshelfService {
        let search = Arc::new(SearchService::new(provider, Arc::new(SearchCache::new(200))));
        BookshelfService::new(search)
    }

    #[test]
    fn test_split_topics() {
        assert_eq!(
            split_topics("merge sort, binary search ,,  ,divide and conquer"),
            vec!["merge sort", "binary search", "divide and conquer"]
        );
        assert!(split_topics(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_resources_are_tagged_in_topic_then_result_order() {
        let provider = Arc::new(CountingProvider::new());
        let shelf = bookshelf(provider.clone());

        let resources = shelf
            .resources(&["a".to_string(), "b".to_string()], 2)
            .await;

        assert!(resources.len() <= 4);
        let tags: Vec<(&str, &str)> = resources
            .iter()
            .map(|r| (r.topic.as_str(), r.title.as_str()))
            .collect();
        assert_eq!(
            tags,
            vec![("a", "a #0"), ("a", "a #1"), ("b", "b #0"), ("b", "b #1")]
        );
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_blank_topics_are_skipped_and_others_trimmed() {
        let provider = Arc::new(CountingProvider::new());
        let shelf = bookshelf(provider.clone());

        let resources = shelf
            .resources(&["   ".to_string(), " graphs ".to_string(), String::new()], 1)
            .await;

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].topic, "graphs");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_topics_are_not_deduplicated() {
        let provider = Arc::new(CountingProvider::new());
        let shelf = bookshelf(provider.clone());

        let resources = shelf
            .resources(&["x".to_string(), "X".to_string()], 1)
            .await;

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].topic, "x");
        assert_eq!(resources[1].topic, "X");
        // The second topic normalizes to the same cache key.
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_tagged_too() {
        let provider = Arc::new(CountingProvider::failing());
        let shelf = bookshelf(provider);

        let resources = shelf.resources(&["down".to_string()], 3).await;

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].title, "Error");
        assert_eq!(resources[0].topic, "down");
    }
}
