use async_trait::async_trait;

use crate::types::RawArticle;
use crate::Result;

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch top headlines for one category/country pair.
    ///
    /// An explicit `api_key` wins over whatever key the implementation has
    /// configured. An empty upstream result is `Ok(vec![])`, not an error.
    async fn top_headlines(
        &self,
        api_key: Option<&str>,
        category: &str,
        country: &str,
    ) -> Result<Vec<RawArticle>>;
}
