//! News article model

use serde::{Deserialize, Serialize};

/// A headline from one of the news feeds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,

    /// Publication date as the feed wrote it (RFC 2822 or RFC 3339)
    pub date: String,

    /// Feed display name
    pub source: String,

    /// Plain-text summary, HTML removed
    pub description: String,
}
