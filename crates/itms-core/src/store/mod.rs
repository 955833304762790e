//! Storage abstraction for ITMS articles.
//!
//! The [`ArticleStore`] trait defines every operation the search engine,
//! the paginated list, and article administration need, so the core logic
//! can run against SQLite in production and [`memory::InMemoryStore`] in tests.
//!
//! Implementations must be `Send + Sync` to work with async runtimes, and
//! must report backend failures as [`SearchError::StorageUnavailable`](crate::SearchError::StorageUnavailable).

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ArticleRecord, ArticleRow, NewArticle};
use crate::page::PageRequest;

/// Row predicate shared by the search engine and the lookup modes.
///
/// Matches articles of one `category`. When `section` is set, only rows whose
/// `section` equals it match; with `include_superseded`, rows whose
/// `old_section` equals it match as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFilter {
    pub category: String,
    pub section: Option<String>,
    pub include_superseded: bool,
}

impl ArticleFilter {
    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            section: None,
            include_superseded: false,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Widen the section match to rows that name it as their `old_section`.
    pub fn including_superseded(mut self) -> Self {
        self.include_superseded = true;
        self
    }

    /// Evaluate the predicate against one record.
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        if record.category != self.category {
            return false;
        }
        match self.section.as_deref() {
            None => true,
            Some(section) => {
                record.section == section
                    || (self.include_superseded
                        && record.old_section.as_deref() == Some(section))
            }
        }
    }
}

/// One page of the admin article table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Rows matching the request's filters, before offset/limit.
    pub filtered: i64,
    pub rows: Vec<ArticleRow>,
}

/// Abstract article storage backend.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`find_articles`](ArticleStore::find_articles) | Full records matching a filter, by id |
/// | [`distinct_titles`](ArticleStore::distinct_titles) | Distinct titles, ascending |
/// | [`distinct_years`](ArticleStore::distinct_years) | Distinct assessment years, descending |
/// | [`distinct_sections`](ArticleStore::distinct_sections) | Distinct sections, ascending |
/// | [`suggest_titles`](ArticleStore::suggest_titles) | Titles containing a term |
/// | [`count_articles`](ArticleStore::count_articles) | Unfiltered row count |
/// | [`page_articles`](ArticleStore::page_articles) | Filtered, ordered page |
/// | [`get_article`](ArticleStore::get_article) | One record by id |
/// | [`insert_article`](ArticleStore::insert_article) | Create, returning the new id |
/// | [`update_article`](ArticleStore::update_article) | Replace all writable fields |
/// | [`delete_article`](ArticleStore::delete_article) | Remove by id |
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All records matching `filter`, ordered by `id` ascending.
    async fn find_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleRecord>>;

    async fn distinct_titles(&self, filter: &ArticleFilter) -> Result<Vec<String>>;

    async fn distinct_years(&self, filter: &ArticleFilter) -> Result<Vec<String>>;

    /// Distinct sections of one category, or of every category when `None`.
    async fn distinct_sections(&self, category: Option<&str>) -> Result<Vec<String>>;

    /// Up to `limit` titles containing `term`, case-insensitively.
    async fn suggest_titles(&self, term: &str, limit: i64) -> Result<Vec<String>>;

    async fn count_articles(&self) -> Result<i64>;

    /// Apply the request's search term and section list, order, and slice.
    async fn page_articles(&self, req: &PageRequest) -> Result<Page>;

    async fn get_article(&self, id: i64) -> Result<Option<ArticleRecord>>;

    async fn insert_article(&self, article: &NewArticle) -> Result<i64>;

    /// Returns `false` when no article has this id.
    async fn update_article(&self, id: i64, article: &NewArticle) -> Result<bool>;

    /// Returns `false` when no article has this id.
    async fn delete_article(&self, id: i64) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(section: &str, old: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            id: 1,
            category: "ITA".into(),
            section: section.into(),
            old_section: old.map(String::from),
            assessment_year: "2022-23".into(),
            title: "t".into(),
            content: String::new(),
        }
    }

    #[test]
    fn test_filter_category_only() {
        let f = ArticleFilter::in_category("ITA");
        assert!(f.matches(&record("1", None)));
        assert!(!ArticleFilter::in_category("ITR").matches(&record("1", None)));
        assert!(!ArticleFilter::in_category("").matches(&record("1", None)));
    }

    #[test]
    fn test_filter_exact_section() {
        let f = ArticleFilter::in_category("ITA").with_section("5");
        assert!(f.matches(&record("5", None)));
        assert!(!f.matches(&record("5A", Some("5"))));
    }

    #[test]
    fn test_filter_including_superseded() {
        let f = ArticleFilter::in_category("ITA")
            .with_section("5")
            .including_superseded();
        assert!(f.matches(&record("5", None)));
        assert!(f.matches(&record("5A", Some("5"))));
        assert!(!f.matches(&record("6", Some("7"))));
    }
}
