//! Article search & aggregation engine.
//!
//! The engine operates entirely through the [`ArticleStore`] trait. Callers
//! build a [`SearchQuery`] from request parameters and pass whichever store
//! implementation they hold.
//!
//! # Algorithm
//!
//! 1. Fetch the **primary** set: `category`, plus `section` when given.
//! 2. Collect distinct non-empty `old_section` values of the primary set.
//! 3. For each, append every row of the same category filed under that
//!    section (no deduplication).
//! 4. Keep rows whose `assessment_year` equals `year` exactly.
//! 5. Keep rows whose `title` equals `title` exactly.
//! 6. Keep rows whose `content` contains `content`, case-insensitively.
//! 7. Stable sort by [`fiscal_year_key`], newest first.

use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::models::ArticleRecord;
use crate::sort_key::fiscal_year_key;
use crate::store::{ArticleFilter, ArticleStore};

/// Maximum number of title suggestions returned by [`suggest_titles`].
pub const SUGGESTION_LIMIT: i64 = 10;

/// Lookup modes served by the article API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Distinct titles of a category (`getTitle`).
    Titles,
    /// Distinct years and titles of a section (`years`).
    Years,
    /// The full engine (`search`).
    Search,
}

impl Mode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "getTitle" => Ok(Mode::Titles),
            "years" => Ok(Mode::Years),
            "search" => Ok(Mode::Search),
            other => Err(SearchError::invalid(format!("Invalid mode: '{}'", other))),
        }
    }
}

/// Inputs for one [`search`] call.
///
/// Optional fields that are empty after trimming are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Compared literally; an empty category matches no stored category.
    pub category: String,
    pub section: Option<String>,
    pub year: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SearchQuery {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn keep(&self, record: &ArticleRecord) -> bool {
        if let Some(year) = present(&self.year) {
            if record.assessment_year != year {
                return false;
            }
        }
        if let Some(title) = present(&self.title) {
            if record.title != title {
                return false;
            }
        }
        if let Some(content) = present(&self.content) {
            if !record
                .content
                .to_lowercase()
                .contains(&content.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Run the search engine against a store.
///
/// Returns records ordered newest fiscal year first; rows with equal keys
/// keep their fetch order (primary rows, then each cross-referenced section
/// in first-seen order). Any storage failure aborts the whole call.
pub async fn search<S: ArticleStore + ?Sized>(
    store: &S,
    query: &SearchQuery,
) -> Result<Vec<ArticleRecord>> {
    let category = query.category.trim();
    let mut primary_filter = ArticleFilter::in_category(category);
    if let Some(section) = present(&query.section) {
        primary_filter = primary_filter.with_section(section);
    }

    let mut rows = store.find_articles(&primary_filter).await?;

    let mut superseded: Vec<String> = Vec::new();
    for record in &rows {
        if let Some(old) = record.superseded_section() {
            if !superseded.iter().any(|s| s == old) {
                superseded.push(old.to_string());
            }
        }
    }

    for old in superseded {
        let filter = ArticleFilter::in_category(category).with_section(old);
        rows.extend(store.find_articles(&filter).await?);
    }

    let mut keyed: Vec<(u64, ArticleRecord)> = rows
        .into_iter()
        .filter(|r| query.keep(r))
        .map(|r| (fiscal_year_key(&r.assessment_year), r))
        .collect();

    // `sort_by` is stable, so equal keys keep their fetch order.
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(keyed.into_iter().map(|(_, r)| r).collect())
}

/// Distinct titles of `category`, ascending.
pub async fn titles<S: ArticleStore + ?Sized>(store: &S, category: &str) -> Result<Vec<String>> {
    store
        .distinct_titles(&ArticleFilter::in_category(category.trim()))
        .await
}

/// Years and titles available under one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionYears {
    pub years: Vec<String>,
    pub titles: Vec<String>,
}

/// Distinct years (descending) and titles (ascending) of rows filed under
/// `section`, or naming it as their superseded section.
pub async fn section_years<S: ArticleStore + ?Sized>(
    store: &S,
    category: &str,
    section: &str,
) -> Result<SectionYears> {
    let section = section.trim();
    if section.is_empty() {
        return Err(SearchError::invalid("section must not be empty"));
    }

    let filter = ArticleFilter::in_category(category.trim())
        .with_section(section)
        .including_superseded();

    Ok(SectionYears {
        years: store.distinct_years(&filter).await?,
        titles: store.distinct_titles(&filter).await?,
    })
}

/// Title completions for a partial term, across all categories.
pub async fn suggest_titles<S: ArticleStore + ?Sized>(store: &S, term: &str) -> Result<Vec<String>> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }
    store.suggest_titles(term, SUGGESTION_LIMIT).await
}
