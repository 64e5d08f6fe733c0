use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown in place of `urlToImage` when the provider has none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/350x400?text=No+Image";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One news item as returned by the provider. Every field is optional on the
/// wire; accessors substitute empty strings where the view needs text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// `source.name`, or an empty string when the provider sent no source.
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|source| source.name.as_deref())
            .unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    pub fn image_url(&self) -> &str {
        match self.url_to_image.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Lower-cased text the keyword filter searches in.
    pub fn searchable_text(&self) -> String {
        [
            self.title.as_deref(),
            self.description.as_deref(),
            self.content.as_deref(),
            self.author.as_deref(),
            Some(self.source_name()),
        ]
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
    }

    /// Parsed `publishedAt`. `None` when missing or not a recognisable
    /// timestamp.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as UTC
/// midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
}

/// Body relayed by the proxy: the article list plus whatever metadata the
/// provider attached (`status`, `totalResults`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl NewsResponse {
    pub fn total_results(&self) -> Option<u64> {
        self.metadata.get("totalResults").and_then(Value::as_u64)
    }
}

pub fn format_display_date(article: &Article) -> String {
    article
        .published_at()
        .map(|date| date.with_timezone(&Local).format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}
