//! Core data models shared by the search engine, the stores, and the
//! HTTP layer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Every category tag the application knows about, in menu order.
pub const CATEGORIES: &[&str] = &[
    "SRO",
    "Paripatra",
    "Circular",
    "ITA",
    "ITR",
    "TDS",
    "ADR",
    "Finance-Act",
    "Assessment",
];

/// Categories whose entries are articles (as opposed to uploaded circulars).
pub const DOCUMENT_CATEGORIES: &[&str] = &["ITA", "ITR", "TDS", "ADR"];

/// One reference entry from the `article` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: i64,
    pub category: String,
    pub section: String,
    /// Section label this record's section superseded. `None` and `""`
    /// both mean "no cross-reference".
    pub old_section: Option<String>,
    pub assessment_year: String,
    pub title: String,
    pub content: String,
}

impl ArticleRecord {
    /// The trimmed, non-empty superseded section, if any.
    pub fn superseded_section(&self) -> Option<&str> {
        self.old_section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Writable fields of an article, used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub category: String,
    pub section: String,
    #[serde(default)]
    pub old_section: Option<String>,
    pub assessment_year: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NewArticle {
    /// Trim every field except `content` and check the required ones.
    ///
    /// An empty `old_section` collapses to `None`.
    pub fn normalized(self) -> Result<Self> {
        let article = NewArticle {
            category: self.category.trim().to_string(),
            section: self.section.trim().to_string(),
            old_section: self
                .old_section
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            assessment_year: self.assessment_year.trim().to_string(),
            title: self.title.trim().to_string(),
            content: self.content,
        };

        for (name, value) in [
            ("category", &article.category),
            ("section", &article.section),
            ("assessment_year", &article.assessment_year),
            ("title", &article.title),
        ] {
            if value.is_empty() {
                return Err(SearchError::invalid(format!("{} must not be empty", name)));
            }
        }

        Ok(article)
    }

    pub fn into_record(self, id: i64) -> ArticleRecord {
        ArticleRecord {
            id,
            category: self.category,
            section: self.section,
            old_section: self.old_section,
            assessment_year: self.assessment_year,
            title: self.title,
            content: self.content,
        }
    }
}

/// The projection of an article listed by the paginated admin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRow {
    pub id: i64,
    pub category: String,
    pub section: String,
    pub title: String,
    pub assessment_year: String,
}

impl From<&ArticleRecord> for ArticleRow {
    fn from(r: &ArticleRecord) -> Self {
        ArticleRow {
            id: r.id,
            category: r.category.clone(),
            section: r.section.clone(),
            title: r.title.clone(),
            assessment_year: r.assessment_year.clone(),
        }
    }
}

/// An uploaded circular with its stored attachment names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: i64,
    pub category: String,
    pub number: String,
    pub year: String,
    pub date: String,
    pub subject: String,
    pub files: Vec<String>,
}
