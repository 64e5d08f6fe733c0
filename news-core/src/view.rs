use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::article::Article;
use crate::client::ArticleFeed;
use crate::error::FetchError;
use crate::filter::{apply_filters, DateWindow, FilterCriteria};
use crate::pagination::{next_page, paginate, previous_page, Page, PAGE_SIZE};

/// Message shown when the article list could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch news. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Article list state behind the news page: the fetched articles, the
/// current criteria and page, and the filtered view derived from them.
#[derive(Debug, Clone)]
pub struct NewsView {
    state: LoadState,
    activated: bool,
    articles: Vec<Article>,
    filtered: Vec<Article>,
    criteria: FilterCriteria,
    page: usize,
    clock: fn() -> DateTime<Local>,
}

impl Default for NewsView {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsView {
    pub fn new() -> Self {
        Self::with_clock(Local::now)
    }

    /// Uses `clock` as "now" for date windows.
    pub fn with_clock(clock: fn() -> DateTime<Local>) -> Self {
        Self {
            state: LoadState::Loading,
            activated: false,
            articles: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            page: 1,
            clock,
        }
    }

    /// Returns `true` exactly once: the caller that gets it owns the fetch.
    pub fn begin_activation(&mut self) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;
        self.state = LoadState::Loading;
        true
    }

    /// Stores the outcome of the activation fetch. A failure is terminal.
    pub fn finish_load(&mut self, result: Result<Vec<Article>, FetchError>) {
        match result {
            Ok(articles) => {
                info!(count = articles.len(), "articles loaded");
                self.articles = articles;
                self.state = LoadState::Ready;
                self.recompute();
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch news");
                self.articles.clear();
                self.filtered.clear();
                self.state = LoadState::Failed(FETCH_FAILED_MESSAGE.to_owned());
            }
        }
    }

    /// Fetches from `feed` on the first call; later calls do nothing.
    pub async fn activate<F>(&mut self, feed: &F)
    where
        F: ArticleFeed + ?Sized,
    {
        if self.begin_activation() {
            let result = feed.fetch_articles().await;
            self.finish_load(result);
        }
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.criteria.keyword = keyword.into();
        self.recompute();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.criteria.source = source.into();
        self.recompute();
    }

    pub fn set_date_window(&mut self, window: DateWindow) {
        self.criteria.date_window = window;
        self.recompute();
    }

    /// Replaces all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn next_page(&mut self) {
        self.page = next_page(self.page, self.total_pages());
    }

    pub fn previous_page(&mut self) {
        self.page = previous_page(self.page);
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn filtered(&self) -> &[Article] {
        &self.filtered
    }

    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        crate::pagination::total_pages(self.filtered.len(), PAGE_SIZE)
    }

    pub fn current_page(&self) -> Page<'_, Article> {
        paginate(&self.filtered, self.page, PAGE_SIZE)
    }

    fn recompute(&mut self) {
        let now = (self.clock)();
        self.filtered = apply_filters(&self.articles, &self.criteria, &now);
        self.page = 1;
    }
}
