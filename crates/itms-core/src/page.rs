//! Offset/limit pagination for the admin article table.
//!
//! Requests arrive as the flat key/value pairs a DataTables client sends
//! (`start`, `length`, `order[0][column]`, `order[0][dir]`, `search[value]`,
//! repeated `section[]`, `draw`). [`PageRequest::from_params`] validates them
//! before any storage access; [`fetch`] runs the counts and the page query.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::models::{ArticleRecord, ArticleRow};
use crate::store::ArticleStore;

const DEFAULT_LENGTH: i64 = 20;

/// Sortable columns, in the index order the client refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Category,
    Section,
    Title,
    AssessmentYear,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Id,
        SortColumn::Category,
        SortColumn::Section,
        SortColumn::Title,
        SortColumn::AssessmentYear,
    ];

    /// Column at `index`; anything out of range sorts by section.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(SortColumn::Section)
    }

    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Category => "category",
            SortColumn::Section => "section",
            SortColumn::Title => "title",
            SortColumn::AssessmentYear => "assessment_year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SearchError::invalid(format!(
                "order direction must be asc or desc, got '{}'",
                other
            ))),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated pagination request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub start: i64,
    /// Page size; `None` returns every remaining row (client sent `-1`).
    pub length: Option<i64>,
    pub column: SortColumn,
    pub direction: SortDirection,
    /// Free-text term matched against title, section, and category.
    pub search: Option<String>,
    /// Exact-match section filter; empty means no restriction.
    pub sections: Vec<String>,
    /// Opaque token echoed back to the client.
    pub draw: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            start: 0,
            length: Some(DEFAULT_LENGTH),
            column: SortColumn::Id,
            direction: SortDirection::Asc,
            search: None,
            sections: Vec::new(),
            draw: 0,
        }
    }
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        SearchError::invalid(format!("{} must be an integer, got '{}'", name, value))
    })
}

fn parse_non_negative(name: &str, value: &str) -> Result<i64> {
    let n = parse_int(name, value)?;
    if n < 0 {
        return Err(SearchError::invalid(format!("{} must be >= 0", name)));
    }
    Ok(n)
}

impl PageRequest {
    /// Build a request from raw query pairs. Unknown keys are ignored and
    /// blank values fall back to their defaults.
    pub fn from_params<K, V>(params: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut req = PageRequest::default();

        for (key, value) in params {
            let value = value.as_ref();
            let blank = value.trim().is_empty();
            match key.as_ref() {
                "start" if !blank => req.start = parse_non_negative("start", value)?,
                "length" if !blank => {
                    let n = parse_int("length", value)?;
                    req.length = match n {
                        -1 => None,
                        n if n < 0 => {
                            return Err(SearchError::invalid("length must be >= 0 or -1"))
                        }
                        n => Some(n),
                    };
                }
                "order[0][column]" if !blank => {
                    let index = parse_non_negative("order[0][column]", value)?;
                    req.column = SortColumn::from_index(index as usize);
                }
                "order[0][dir]" => req.direction = SortDirection::parse(value)?,
                "search[value]" if !blank => req.search = Some(value.trim().to_string()),
                "section[]" if !blank => req.sections.push(value.trim().to_string()),
                "draw" if !blank => req.draw = parse_int("draw", value)?,
                _ => {}
            }
        }

        Ok(req)
    }

    /// Whether `record` passes the search term and section list.
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        if !self.sections.is_empty() && !self.sections.iter().any(|s| *s == record.section) {
            return false;
        }
        match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&record.title, &record.section, &record.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }

    /// Order two records by the requested column and direction, then by id.
    pub fn compare(&self, a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
        let ord = match self.column {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Category => a.category.cmp(&b.category),
            SortColumn::Section => a.section.cmp(&b.section),
            SortColumn::Title => a.title.cmp(&b.title),
            SortColumn::AssessmentYear => a.assessment_year.cmp(&b.assessment_year),
        };
        let ord = match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then(a.id.cmp(&b.id))
    }
}

/// Response body for the paginated list, in the shape DataTables expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub draw: i64,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<ArticleRow>,
}

/// Run a paginated listing against an [`ArticleStore`].
pub async fn fetch<S: ArticleStore + ?Sized>(store: &S, req: &PageRequest) -> Result<PageResponse> {
    let records_total = store.count_articles().await?;
    let page = store.page_articles(req).await?;

    Ok(PageResponse {
        draw: req.draw,
        records_total,
        records_filtered: page.filtered,
        data: page.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Result<PageRequest> {
        PageRequest::from_params(pairs)
    }

    #[test]
    fn test_defaults() {
        let req = params(&[]).unwrap();
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.length, Some(20));
    }

    #[test]
    fn test_full_request() {
        let req = params(&[
            ("draw", "3"),
            ("start", "40"),
            ("length", "10"),
            ("order[0][column]", "3"),
            ("order[0][dir]", "DESC"),
            ("search[value]", " rebate "),
            ("section[]", "80C"),
            ("section[]", "80D"),
            ("columns[0][data]", "id"),
        ])
        .unwrap();
        assert_eq!(req.draw, 3);
        assert_eq!(req.start, 40);
        assert_eq!(req.length, Some(10));
        assert_eq!(req.column, SortColumn::Title);
        assert_eq!(req.direction, SortDirection::Desc);
        assert_eq!(req.search.as_deref(), Some("rebate"));
        assert_eq!(req.sections, vec!["80C", "80D"]);
    }

    #[test]
    fn test_out_of_range_column_sorts_by_section() {
        let req = params(&[("order[0][column]", "9")]).unwrap();
        assert_eq!(req.column, SortColumn::Section);
    }

    #[test]
    fn test_length_minus_one_means_all() {
        let req = params(&[("length", "-1")]).unwrap();
        assert_eq!(req.length, None);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        for pair in [
            ("start", "abc"),
            ("start", "-5"),
            ("length", "-2"),
            ("length", "ten"),
            ("order[0][column]", "x"),
            ("draw", "1.5"),
        ] {
            let err = params(&[pair]).unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidArgument(_)),
                "{:?} should be rejected",
                pair
            );
        }
    }

    #[test]
    fn test_rejects_unknown_direction() {
        let err = params(&[("order[0][dir]", "sideways")]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    fn record(id: i64, category: &str, section: &str, title: &str) -> ArticleRecord {
        ArticleRecord {
            id,
            category: category.into(),
            section: section.into(),
            old_section: None,
            assessment_year: "2022-23".into(),
            title: title.into(),
            content: String::new(),
        }
    }

    #[test]
    fn test_matches_search_term_or_fields() {
        let req = PageRequest {
            search: Some("REBATE".into()),
            ..Default::default()
        };
        assert!(req.matches(&record(1, "ITA", "44", "Investment rebate")));
        assert!(!req.matches(&record(2, "ITA", "44", "Other")));

        let req = PageRequest {
            search: Some("it".into()),
            ..Default::default()
        };
        assert!(req.matches(&record(3, "ITR", "1", "x")));
    }

    #[test]
    fn test_matches_section_list() {
        let req = PageRequest {
            sections: vec!["80C".into()],
            search: Some("x".into()),
            ..Default::default()
        };
        assert!(req.matches(&record(1, "ITA", "80C", "x")));
        assert!(!req.matches(&record(2, "ITA", "80D", "x")));
    }

    #[test]
    fn test_compare_breaks_ties_by_id() {
        let req = PageRequest {
            column: SortColumn::Section,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let a = record(2, "ITA", "5", "a");
        let b = record(1, "ITA", "5", "b");
        let c = record(3, "ITA", "6", "c");
        assert_eq!(req.compare(&c, &a), Ordering::Less);
        assert_eq!(req.compare(&b, &a), Ordering::Less);
    }
}
