//! RSS and Atom news aggregation

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use regex::Regex;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::NewsApi;
use super::models::NewsArticle;
use super::parallel::settle_all;
use crate::config::FeedSource;
use crate::error::{ApiError, Result};

/// Items taken from the top of each feed
pub const ITEMS_PER_FEED: usize = 10;

/// Articles returned after merging all feeds
pub const MAX_ARTICLES: usize = 15;

/// Description length after HTML stripping, in characters
pub const DESCRIPTION_LIMIT: usize = 200;

/// Characters of the normalized title used for duplicate detection
const TITLE_KEY_LEN: usize = 40;

const USER_AGENT: &str = concat!("Pitwall/", env!("CARGO_PKG_VERSION"));

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"));

/// Root of either an RSS 2.0 or an Atom document
#[derive(Debug, Default, Deserialize)]
struct FeedDocument {
    /// RSS: `<rss><channel><item>...`
    #[serde(default)]
    channel: Option<Channel>,

    /// Atom: `<feed><entry>...`
    #[serde(default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default)]
    item: Vec<RssItem>,
}

/// Fields are lists because the deserializer matches local names, so
/// `<atom:link>` lands in `link` and `<media:title>` in `title`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RssItem {
    #[serde(default)]
    title: Vec<TextNode>,
    #[serde(default)]
    link: Vec<TextNode>,
    #[serde(default)]
    pub_date: Vec<TextNode>,
    #[serde(default)]
    description: Vec<TextNode>,
}

#[derive(Debug, Default, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: Vec<TextNode>,
    #[serde(default)]
    link: Vec<AtomLink>,
    #[serde(default)]
    published: Vec<TextNode>,
    #[serde(default)]
    updated: Vec<TextNode>,
    #[serde(default)]
    summary: Vec<TextNode>,
}

/// Element whose text we want regardless of its attributes (`type="html"`)
#[derive(Debug, Default, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Text of the first element that has any; attribute-only elements are skipped.
fn first_text(nodes: Vec<TextNode>) -> String {
    nodes
        .into_iter()
        .map(|n| n.value)
        .find(|v| !v.trim().is_empty())
        .unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: Option<String>,
    #[serde(rename = "@rel", default)]
    rel: Option<String>,
}

impl AtomEntry {
    fn href(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
            .or_else(|| self.link.first())
            .and_then(|l| l.href.as_deref())
    }
}

/// Parse an RSS or Atom document into at most [`ITEMS_PER_FEED`] articles.
pub fn parse_feed(xml: &str, source: &str) -> Result<Vec<NewsArticle>> {
    let doc: FeedDocument = quick_xml::de::from_str(xml).map_err(ApiError::from)?;

    let articles = match doc.channel {
        Some(channel) => channel
            .item
            .into_iter()
            .take(ITEMS_PER_FEED)
            .map(|item| NewsArticle {
                title: first_text(item.title),
                link: first_text(item.link),
                date: first_text(item.pub_date),
                source: source.to_string(),
                description: strip_html(&first_text(item.description)),
            })
            .collect(),
        None => doc
            .entry
            .into_iter()
            .take(ITEMS_PER_FEED)
            .map(|entry| NewsArticle {
                link: entry.href().unwrap_or_default().to_string(),
                title: first_text(entry.title),
                date: Some(first_text(entry.published))
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| first_text(entry.updated)),
                source: source.to_string(),
                description: strip_html(&first_text(entry.summary)),
            })
            .collect(),
    };

    Ok(articles)
}

/// Remove markup and cut to [`DESCRIPTION_LIMIT`] characters.
pub fn strip_html(html: &str) -> String {
    HTML_TAG
        .replace_all(html, "")
        .trim()
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}

/// Lowercased alphanumerics of the title, first 40 characters.
pub fn normalize_title_key(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(TITLE_KEY_LEN)
        .collect()
}

fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_rfc3339(date))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Merge articles from all feeds: first occurrence of each title wins,
/// newest first, capped at [`MAX_ARTICLES`]. Undated articles sort last.
pub fn aggregate_articles(articles: impl IntoIterator<Item = NewsArticle>) -> Vec<NewsArticle> {
    let mut seen = HashSet::new();
    let mut unique: Vec<NewsArticle> = articles
        .into_iter()
        .filter(|a| seen.insert(normalize_title_key(&a.title)))
        .collect();

    unique.sort_by_key(|a| Reverse(parse_date(&a.date)));
    unique.truncate(MAX_ARTICLES);
    unique
}

/// Fetches and merges the configured news feeds
pub struct NewsClient {
    http: HttpClient,
    feeds: Vec<FeedSource>,
}

impl NewsClient {
    pub fn new(feeds: Vec<FeedSource>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, feeds })
    }

    async fn fetch_feed(http: HttpClient, feed: FeedSource) -> Result<Vec<NewsArticle>> {
        debug!("Fetching feed {} ({})", feed.name, feed.url);

        let response = http.get(&feed.url).send().await.map_err(ApiError::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ServerError(format!("{} returned {}", feed.name, status)).into());
        }

        let xml = response.text().await.map_err(ApiError::from)?;
        parse_feed(&xml, &feed.name)
    }
}

#[async_trait]
impl NewsApi for NewsClient {
    async fn news(&self) -> Result<Vec<NewsArticle>> {
        let jobs: Vec<_> = self
            .feeds
            .iter()
            .cloned()
            .map(|feed| Self::fetch_feed(self.http.clone(), feed))
            .collect();

        let results = settle_all(jobs, self.feeds.len()).await;

        let mut articles = Vec::new();
        let mut succeeded = 0;
        for (feed, result) in self.feeds.iter().zip(results) {
            match result {
                Ok(items) => {
                    succeeded += 1;
                    articles.extend(items);
                }
                Err(e) => warn!("Failed to fetch {}: {}", feed.name, e),
            }
        }

        if succeeded == 0 && !self.feeds.is_empty() {
            return Err(ApiError::NoData("every news feed failed".to_string()).into());
        }

        Ok(aggregate_articles(articles))
    }
}
