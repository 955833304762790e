//! In-memory [`ArticleStore`] implementation for tests and demos.
//!
//! Rows live in a `Vec` behind `std::sync::RwLock`, kept in id order.
//! Ids are assigned sequentially starting at 1, as SQLite's rowid would.

use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{Result, SearchError};
use crate::models::{ArticleRecord, ArticleRow, NewArticle};
use crate::page::PageRequest;

use super::{ArticleFilter, ArticleStore, Page};

struct Table {
    rows: Vec<ArticleRecord>,
    next_id: i64,
}

/// In-memory article store.
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Build a store pre-populated with `articles`, ids assigned in order.
    pub fn with_articles(articles: impl IntoIterator<Item = NewArticle>) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.write().unwrap_or_else(|e| e.into_inner());
            for article in articles {
                let id = table.next_id;
                table.next_id += 1;
                table.rows.push(article.into_record(id));
            }
        }
        store
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|_| SearchError::storage("article table lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>> {
        self.table
            .write()
            .map_err(|_| SearchError::storage("article table lock poisoned"))
    }

    fn distinct(
        &self,
        filter: &ArticleFilter,
        field: fn(&ArticleRecord) -> &str,
    ) -> Result<BTreeSet<String>> {
        let table = self.read()?;
        Ok(table
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| field(r).to_string())
            .collect())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for InMemoryStore {
    async fn find_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleRecord>> {
        let table = self.read()?;
        Ok(table
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn distinct_titles(&self, filter: &ArticleFilter) -> Result<Vec<String>> {
        Ok(self.distinct(filter, |r| r.title.as_str())?.into_iter().collect())
    }

    async fn distinct_years(&self, filter: &ArticleFilter) -> Result<Vec<String>> {
        Ok(self
            .distinct(filter, |r| r.assessment_year.as_str())?
            .into_iter()
            .rev()
            .collect())
    }

    async fn distinct_sections(&self, category: Option<&str>) -> Result<Vec<String>> {
        let table = self.read()?;
        let sections: BTreeSet<String> = table
            .rows
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .map(|r| r.section.clone())
            .collect();
        Ok(sections.into_iter().collect())
    }

    async fn suggest_titles(&self, term: &str, limit: i64) -> Result<Vec<String>> {
        let term = term.to_lowercase();
        let table = self.read()?;
        Ok(table
            .rows
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&term))
            .map(|r| r.title.clone())
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_articles(&self) -> Result<i64> {
        Ok(self.read()?.rows.len() as i64)
    }

    async fn page_articles(&self, req: &PageRequest) -> Result<Page> {
        let table = self.read()?;
        let mut matched: Vec<&ArticleRecord> = table.rows.iter().filter(|r| req.matches(r)).collect();
        matched.sort_by(|a, b| req.compare(a, b));

        let filtered = matched.len() as i64;
        let take = req.length.map_or(usize::MAX, |n| n as usize);
        let rows = matched
            .into_iter()
            .skip(req.start as usize)
            .take(take)
            .map(ArticleRow::from)
            .collect();

        Ok(Page { filtered, rows })
    }

    async fn get_article(&self, id: i64) -> Result<Option<ArticleRecord>> {
        let table = self.read()?;
        Ok(table.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<i64> {
        let mut table = self.write()?;
        let id = table.next_id;
        table.next_id += 1;
        table.rows.push(article.clone().into_record(id));
        Ok(id)
    }

    async fn update_article(&self, id: i64, article: &NewArticle) -> Result<bool> {
        let mut table = self.write()?;
        match table.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                *row = article.clone().into_record(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        let mut table = self.write()?;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok(table.rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(category: &str, section: &str, title: &str) -> NewArticle {
        NewArticle {
            category: category.into(),
            section: section.into(),
            old_section: None,
            assessment_year: "2021-22".into(),
            title: title.into(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = InMemoryStore::new();
        let id = store.insert_article(&article("ITA", "1", "a")).await.unwrap();
        assert_eq!(id, 1);

        let mut changed = article("ITA", "2", "b");
        changed.old_section = Some("1".into());
        assert!(store.update_article(id, &changed).await.unwrap());
        let got = store.get_article(id).await.unwrap().unwrap();
        assert_eq!(got.section, "2");
        assert_eq!(got.old_section.as_deref(), Some("1"));

        assert!(!store.update_article(99, &changed).await.unwrap());
        assert!(store.delete_article(id).await.unwrap());
        assert!(!store.delete_article(id).await.unwrap());
        assert!(store.get_article(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryStore::with_articles([article("ITA", "1", "a"), article("ITA", "2", "b")]);
        store.delete_article(2).await.unwrap();
        let id = store.insert_article(&article("ITA", "3", "c")).await.unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn test_distinct_lookups() {
        let store = InMemoryStore::with_articles([
            article("ITA", "10", "b"),
            article("ITA", "2", "a"),
            article("ITA", "10", "a"),
            article("ITR", "7", "z"),
        ]);
        let f = ArticleFilter::in_category("ITA");
        assert_eq!(store.distinct_titles(&f).await.unwrap(), vec!["a", "b"]);
        assert_eq!(
            store.distinct_sections(Some("ITA")).await.unwrap(),
            vec!["10", "2"]
        );
        assert_eq!(
            store.distinct_sections(None).await.unwrap(),
            vec!["10", "2", "7"]
        );
    }

    #[tokio::test]
    async fn test_suggest_titles_limit() {
        let store = InMemoryStore::with_articles(
            (0..15).map(|i| article("ITA", "1", &format!("Tax note {}", i))),
        );
        let titles = store.suggest_titles("NOTE", 10).await.unwrap();
        assert_eq!(titles.len(), 10);
        assert!(store.suggest_titles("absent", 10).await.unwrap().is_empty());
    }
}
