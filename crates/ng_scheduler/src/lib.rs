use ng_sources::IngestManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Categories fetched on every cycle, in this order.
pub const CATEGORIES: [&str; 5] = [
    "business",
    "health",
    "technology",
    "sports",
    "entertainment",
];

pub const DEFAULT_COUNTRY: &str = "us";

/// One cycle per hour unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Drives the ingestion pipeline across the fixed category list, once per
/// interval, until stopped.
pub struct Scheduler {
    manager: Arc<IngestManager>,
    country: String,
    interval: Duration,
}

impl Scheduler {
    pub fn new(manager: Arc<IngestManager>) -> Self {
        Self {
            manager,
            country: DEFAULT_COUNTRY.to_string(),
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// One pass over every category. A failing category is logged and the
    /// pass moves on to the next one; nothing escapes this loop.
    pub async fn run_cycle(&self) {
        info!("🗞️ Starting news fetch cycle");
        for category in CATEGORIES {
            match self.manager.ingest(category, &self.country, None).await {
                Ok(report) => {
                    info!("✅ {}: fetched {}, saved {}", category, report.fetched, report.saved);
                }
                Err(e) => {
                    error!("❌ {}: {}", category, e);
                }
            }
        }
        info!("🗞️ News fetch cycle completed");
    }

    /// Spawn the loop: one cycle immediately, then one per interval.
    /// The returned handle owns the task; dropping it also stops the loop.
    pub fn start(self) -> SchedulerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            loop {
                self.run_cycle().await;
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = stop_rx.changed() => break,
                }
            }
        });

        SchedulerHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Owner handle for a running scheduler.
pub struct SchedulerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop and wait for it to wind down. An in-flight cycle
    /// finishes its store writes before the loop observes the signal.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ng_core::{ArticleStore, Error, HeadlineSource, RawArticle, Result};
    use ng_storage::SqliteStore;
    use ng_verify::HeuristicVerifier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct StubSource {
        fail_category: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(fail_category: Option<&'static str>) -> Self {
            Self {
                fail_category,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HeadlineSource for StubSource {
        async fn top_headlines(
            &self,
            _api_key: Option<&str>,
            category: &str,
            _country: &str,
        ) -> Result<Vec<RawArticle>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_category == Some(category) {
                return Err(Error::Upstream("503: provider unavailable".to_string()));
            }
            Ok(vec![RawArticle {
                title: format!("{} story", category),
                description: "a story of reasonable length".to_string(),
                url: format!("https://example.com/{}", category),
                source: "Stub Wire".to_string(),
                published_at: "2024-01-01T00:00:00Z".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn cycle_survives_a_failing_category() {
        let source = Arc::new(StubSource::new(Some("health")));
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(
            SqliteStore::open(temp_dir.path().join("test.db"))
                .await
                .unwrap(),
        );
        let manager = Arc::new(IngestManager::new(
            source.clone(),
            Arc::new(HeuristicVerifier::new()),
            store.clone(),
        ));
        let scheduler = Scheduler::new(manager);

        scheduler.run_cycle().await;

        // All five categories were attempted.
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
        // Four produced rows; the failing one contributed nothing.
        assert_eq!(store.all(100).await.unwrap().len(), 4);
        assert!(store.by_category("health", 10).await.unwrap().is_empty());
        assert_eq!(store.by_category("business", 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_cycle_skips_already_stored_urls() {
        let source = Arc::new(StubSource::new(None));
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(
            SqliteStore::open(temp_dir.path().join("test.db"))
                .await
                .unwrap(),
        );
        let manager = Arc::new(IngestManager::new(
            source.clone(),
            Arc::new(HeuristicVerifier::new()),
            store.clone(),
        ));
        let scheduler = Scheduler::new(manager);

        scheduler.run_cycle().await;
        scheduler.run_cycle().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 10);
        // The stub repeats the same urls, so the second cycle adds nothing.
        assert_eq!(store.all(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn stop_is_prompt_even_mid_interval() {
        let source = Arc::new(StubSource::new(None));
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(
            SqliteStore::open(temp_dir.path().join("test.db"))
                .await
                .unwrap(),
        );
        let manager = Arc::new(IngestManager::new(
            source.clone(),
            Arc::new(HeuristicVerifier::new()),
            store,
        ));
        let handle = Scheduler::new(manager)
            .with_interval(Duration::from_secs(3600))
            .start();

        // Wait for the immediate first cycle to finish.
        for _ in 0..500 {
            if source.calls.load(Ordering::SeqCst) >= 5 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);

        // The loop is now parked on the hour-long wait; stop must not
        // block until it elapses.
        tokio::time::timeout(Duration::from_secs(5), handle.stop())
            .await
            .expect("stop should complete promptly");

        // Exactly one cycle ran.
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    }
}
