use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Source selection meaning "do not filter by source".
pub const ALL_SOURCES: &str = "All";

/// Sources offered in the source picker, in display order.
pub const KNOWN_SOURCES: &[&str] = &[
    ALL_SOURCES,
    "Reuters",
    "Bloomberg",
    "CNBC",
    "TechCrunch",
    "The Verge",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateWindow {
    #[default]
    #[serde(rename = "all-time")]
    AllTime,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7-days")]
    Last7Days,
    #[serde(rename = "30-days")]
    Last30Days,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::AllTime,
        DateWindow::Today,
        DateWindow::Last7Days,
        DateWindow::Last30Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DateWindow::AllTime => "All Time",
            DateWindow::Today => "Today",
            DateWindow::Last7Days => "Last 7 Days",
            DateWindow::Last30Days => "Last 30 Days",
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub keyword: String,
    /// Exact `source.name`; empty or [`ALL_SOURCES`] disables the filter.
    pub source: String,
    pub date_window: DateWindow,
}

impl FilterCriteria {
    pub fn is_unfiltered(&self) -> bool {
        self.keyword.trim().is_empty()
            && source_filter_inactive(&self.source)
            && self.date_window == DateWindow::AllTime
    }
}

fn source_filter_inactive(source: &str) -> bool {
    source.is_empty() || source == ALL_SOURCES
}

/// Keeps articles whose searchable text contains every whitespace-separated
/// term of `keyword`, ignoring case.
pub fn filter_by_keyword(articles: &[Article], keyword: &str) -> Vec<Article> {
    let terms: Vec<String> = keyword
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if terms.is_empty() {
        return articles.to_vec();
    }

    articles
        .iter()
        .filter(|article| {
            let haystack = article.searchable_text();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .cloned()
        .collect()
}

/// Earliest publish instant admitted by `window`, relative to `now`.
/// `None` for [`DateWindow::AllTime`].
pub fn date_cutoff<Tz: TimeZone>(window: DateWindow, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    match window {
        DateWindow::AllTime => None,
        DateWindow::Today => {
            let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
            let tz = now.timezone();
            // A DST jump can skip local midnight; use the UTC reading then.
            Some(
                midnight
                    .and_local_timezone(tz.clone())
                    .earliest()
                    .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
            )
        }
        DateWindow::Last7Days => Some(now.clone() - Duration::days(7)),
        DateWindow::Last30Days => Some(now.clone() - Duration::days(30)),
    }
}

/// Keeps articles published at or after the window's cutoff. Articles whose
/// `publishedAt` cannot be parsed never match an active window.
pub fn filter_by_date<Tz: TimeZone>(
    articles: &[Article],
    window: DateWindow,
    now: &DateTime<Tz>,
) -> Vec<Article> {
    let Some(cutoff) = date_cutoff(window, now) else {
        return articles.to_vec();
    };
    let cutoff = cutoff.with_timezone(&Utc);

    articles
        .iter()
        .filter(|article| match article.published_at() {
            Some(published) => published.with_timezone(&Utc) >= cutoff,
            None => false,
        })
        .cloned()
        .collect()
}

pub fn filter_by_source(articles: &[Article], source: &str) -> Vec<Article> {
    if source_filter_inactive(source) {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|article| article.source_name() == source)
        .cloned()
        .collect()
}

/// Runs keyword, date and source filters in that order. The input is never
/// reordered.
pub fn apply_filters<Tz: TimeZone>(
    articles: &[Article],
    criteria: &FilterCriteria,
    now: &DateTime<Tz>,
) -> Vec<Article> {
    let filtered = filter_by_keyword(articles, &criteria.keyword);
    let filtered = filter_by_date(&filtered, criteria.date_window, now);
    filter_by_source(&filtered, &criteria.source)
}
