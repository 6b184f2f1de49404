use async_trait::async_trait;

use crate::types::{ScoredArticle, StoredArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a batch under one category, skipping rows whose url is
    /// already stored. Returns the number of rows actually accepted.
    async fn insert_batch(&self, articles: &[ScoredArticle], category: &str) -> Result<u64>;

    /// All columns for rows matching `category`, newest published first.
    async fn by_category(&self, category: &str, limit: i64) -> Result<Vec<StoredArticle>>;

    /// All columns for every row, newest published first.
    async fn all(&self, limit: i64) -> Result<Vec<StoredArticle>>;

    /// Overwrite the verification flag and score for one row.
    /// Unknown ids are a silent no-op.
    async fn update_verification(&self, id: i64, verified: bool, score: f64) -> Result<()>;
}
