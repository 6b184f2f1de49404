use ng_core::{ArticleStore, HeadlineSource, Result, ScoredArticle, Verifier};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Outcome of one fetch → verify → store pass for a single category.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub fetched: usize,
    pub saved: u64,
    pub articles: Vec<ScoredArticle>,
}

/// Sequences the ingestion pipeline for one category at a time. Shared by
/// the background scheduler and the on-demand fetch endpoint; concurrent
/// passes are safe because the store deduplicates by url.
pub struct IngestManager {
    source: Arc<dyn HeadlineSource>,
    verifier: Arc<dyn Verifier>,
    store: Arc<dyn ArticleStore>,
}

impl IngestManager {
    pub fn new(
        source: Arc<dyn HeadlineSource>,
        verifier: Arc<dyn Verifier>,
        store: Arc<dyn ArticleStore>,
    ) -> Self {
        Self {
            source,
            verifier,
            store,
        }
    }

    pub fn store(&self) -> Arc<dyn ArticleStore> {
        self.store.clone()
    }

    /// Fetch headlines for `category`, score them, and persist the batch.
    /// Every failure surfaces as a value; nothing is stored on a failed
    /// fetch.
    pub async fn ingest(
        &self,
        category: &str,
        country: &str,
        api_key: Option<&str>,
    ) -> Result<IngestReport> {
        let raw = self.source.top_headlines(api_key, category, country).await?;
        let articles = self.verifier.verify_batch(raw);
        let saved = self.store.insert_batch(&articles, category).await?;
        info!("💾 {}: saved {}/{} articles", category, saved, articles.len());

        Ok(IngestReport {
            fetched: articles.len(),
            saved,
            articles,
        })
    }
}
