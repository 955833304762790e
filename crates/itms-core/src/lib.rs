//! # ITMS Core
//!
//! Storage-agnostic logic for ITMS: the article data model, the bilingual
//! fiscal-year sort key, the [`store::ArticleStore`] abstraction, the
//! search & aggregation engine, and pagination request parsing.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! runtime-specific dependencies. The application crate supplies a
//! SQLite-backed store; [`store::memory::InMemoryStore`] serves tests.

pub mod articles;
pub mod error;
pub mod models;
pub mod page;
pub mod search;
pub mod sort_key;
pub mod store;

pub use error::SearchError;
pub use models::{ArticleRecord, ArticleRow, NewArticle};
