use thiserror::Error;

/// Failure raised by the search engine and the [`ArticleStore`](crate::store::ArticleStore)
/// operations it drives.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The backing store could not be reached or a query failed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A request parameter could not be interpreted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SearchError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        SearchError::StorageUnavailable(err.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        SearchError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
