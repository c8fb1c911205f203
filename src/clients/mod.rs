pub mod duckduckgo;

use anyhow::Result;

/// One raw hit as returned by a web-search provider, before sanitation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebHit {
    pub title: String,
    pub href: String,
    pub body: String,
}

/// A free-text web search backend.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns at most `max_results` hits for `query`.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>>;
}
