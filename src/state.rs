use std::sync::Arc;

use crate::clients::SearchProvider;
use crate::clients::duckduckgo::DuckDuckGoClient;
use crate::config::Config;
use crate::db::{self, Store};
use crate::services::{
    BookshelfService, PostService, SeaOrmPostService, SearchCache, SearchService,
};

/// Build the HTTP client used for outbound search requests.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            config.search.request_timeout_seconds,
        ))
        .user_agent(config.search.user_agent.clone())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub search_service: Arc<SearchService>,

    pub bookshelf_service: Arc<BookshelfService>,

    pub post_service: Arc<dyn PostService>,
}

impl SharedState {
    /// Connects to the database (with the startup retry policy) and wires the
    /// DuckDuckGo provider.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = db::connect_with_retry(&config.database).await?;

        let http_client = build_shared_http_client(&config)?;
        let provider = Arc::new(DuckDuckGoClient::with_shared_client(
            http_client,
            &config.search.base_url,
        )) as Arc<dyn SearchProvider>;

        Ok(Self::from_parts(config, store, provider))
    }

    /// Connects to the database and uses the given search provider instead of
    /// DuckDuckGo.
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn SearchProvider>,
    ) -> anyhow::Result<Self> {
        let store = db::connect_with_retry(&config.database).await?;
        Ok(Self::from_parts(config, store, provider))
    }

    #[must_use]
    pub fn from_parts(config: Config, store: Store, provider: Arc<dyn SearchProvider>) -> Self {
        let cache = Arc::new(SearchCache::new(config.search.cache_capacity));
        let search_service = Arc::new(SearchService::new(provider, cache));
        let bookshelf_service = Arc::new(BookshelfService::new(search_service.clone()));

        let post_service =
            Arc::new(SeaOrmPostService::new(store.clone())) as Arc<dyn PostService>;

        Self {
            config: Arc::new(config),
            store,
            search_service,
            bookshelf_service,
            post_service,
        }
    }
}
