//! Article administration: validated create, update, and delete.

use crate::error::Result;
use crate::models::NewArticle;
use crate::store::ArticleStore;

/// Validate and insert an article, returning its new id.
pub async fn create<S: ArticleStore + ?Sized>(store: &S, article: NewArticle) -> Result<i64> {
    let article = article.normalized()?;
    store.insert_article(&article).await
}

/// Validate and replace the writable fields of article `id`.
///
/// Returns `false` when no article has this id.
pub async fn update<S: ArticleStore + ?Sized>(
    store: &S,
    id: i64,
    article: NewArticle,
) -> Result<bool> {
    let article = article.normalized()?;
    store.update_article(id, &article).await
}
