use anyhow::Result;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use super::{SearchProvider, WebHit};

pub const DUCKDUCKGO_HTML_BASE: &str = "https://html.duckduckgo.com/html/";

/// Consolidates regexes for HTML parsing to avoid per-call overhead.
struct ResultRegex {
    title_anchor: Regex,
    href: Regex,
    snippet: Regex,
    tag: Regex,
    whitespace: Regex,
}

impl ResultRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<ResultRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    title_anchor: Regex::new(r#"(?s)<a([^>]*class="result__a"[^>]*)>(.*?)</a>"#)
                        .ok()?,
                    href: Regex::new(r#"href="([^"]*)""#).ok()?,
                    snippet: Regex::new(
                        r#"(?s)<(a|div|td)[^>]*class="result__snippet"[^>]*>(.*?)</(?:a|div|td)>"#,
                    )
                    .ok()?,
                    tag: Regex::new(r"<[^>]+>").ok()?,
                    whitespace: Regex::new(r"\s+").ok()?,
                })
            })
            .as_ref()
    }
}

fn clean_text(raw: &str, re: &ResultRegex) -> String {
    let without_tags = re.tag.replace_all(raw, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    re.whitespace.replace_all(&decoded, " ").trim().to_string()
}

/// DuckDuckGo wraps outbound links as `//duckduckgo.com/l/?uddg=<target>`.
fn resolve_href(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw).to_string();
    let absolute = if decoded.starts_with("//") {
        format!("https:{decoded}")
    } else {
        decoded
    };

    let Ok(parsed) = Url::parse(&absolute) else {
        return absolute;
    };

    if parsed.path().starts_with("/l/")
        && let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg")
    {
        return target.into_owned();
    }

    absolute
}

fn is_ad_link(href: &str) -> bool {
    href.contains("duckduckgo.com/y.js") || href.contains("ad_provider=")
}

fn parse_block(block: &str, re: &ResultRegex) -> Option<WebHit> {
    let anchor = re.title_anchor.captures(block)?;
    let attrs = anchor.get(1)?.as_str();
    let raw_href = re.href.captures(attrs)?.get(1)?.as_str();

    if is_ad_link(raw_href) {
        return None;
    }

    let href = resolve_href(raw_href);
    if href.is_empty() {
        return None;
    }

    let body = re
        .snippet
        .captures(block)
        .and_then(|c| c.get(2))
        .map(|m| clean_text(m.as_str(), re))
        .unwrap_or_default();

    Some(WebHit {
        title: clean_text(anchor.get(2).map_or("", |m| m.as_str()), re),
        href,
        body,
    })
}

/// Extracts organic results from a DuckDuckGo HTML results page.
pub fn parse_results(html: &str, max_results: usize) -> Vec<WebHit> {
    let Some(re) = ResultRegex::get() else {
        return Vec::new();
    };

    html.split("result__body")
        .skip(1)
        .filter_map(|block| parse_block(block, re))
        .take(max_results)
        .collect()
}

#[derive(Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    base_url: String,
}

impl DuckDuckGoClient {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, user_agent: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self::with_shared_client(client, base_url))
    }

    /// Creates a client on top of an existing HTTP client.
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("Failed to parse search base URL: {e}"))?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGoClient {
    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>> {
        let url = self.search_url(query)?;

        debug!("Querying DuckDuckGo for '{}'", query);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        // 202 is the rate-limit interstitial; it carries no results.
        if status != StatusCode::OK {
            anyhow::bail!("DuckDuckGo returned HTTP {status}");
        }

        let html = response.text().await?;
        let hits = parse_results(&html, max_results);

        debug!("DuckDuckGo returned {} result(s) for '{}'", hits.len(), query);
        Ok(hits)
    }
}
