use std::sync::Arc;
use std::time::Duration;

use crate::clients::duckduckgo::DuckDuckGoClient;
use crate::config::Config;
use crate::services::{SearchCache, SearchService};

pub async fn cmd_search(config: &Config, topic: &str, max_results: usize) -> anyhow::Result<()> {
    println!("Searching for: {topic}");

    let client = DuckDuckGoClient::new(
        &config.search.base_url,
        &config.search.user_agent,
        Duration::from_secs(config.search.request_timeout_seconds),
    )?;
    let service = SearchService::new(Arc::new(client), Arc::new(SearchCache::new(1)));

    let results = service.search(topic, max_results).await;

    if results.is_empty() {
        println!("No results found for '{topic}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for (i, result) in results.iter().enumerate() {
        println!("[{}] {}", i + 1, result.title);
        if !result.url.is_empty() {
            println!("    {}", result.url);
        }
        if !result.snippet.is_empty() {
            println!("    {}", result.snippet);
        }
        println!();
    }

    Ok(())
}
