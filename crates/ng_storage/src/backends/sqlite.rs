use async_trait::async_trait;
use chrono::Utc;
use ng_core::{ArticleStore, Error, Result, ScoredArticle, StoredArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use tracing::info;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT,
        source TEXT,
        url TEXT UNIQUE,
        category TEXT,
        published_at TEXT,
        verified BOOLEAN DEFAULT 0,
        credibility_score REAL DEFAULT 0.0,
        fetched_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    // Add future migrations here
];

pub struct SqliteStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `db_path` and ensure the
    /// schema exists.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("failed to connect to database: {}", e)))?;

        let store = Self { pool, db_path };
        store.init().await?;
        Ok(store)
    }

    /// Idempotently ensure the schema exists. Safe to call on every start.
    pub async fn init(&self) -> Result<()> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::Database(format!("failed to run migration {}: {}", i, e)))?;
        }
        info!("✅ Database initialized at {}", self.db_path.display());
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn row_to_article(row: &SqliteRow) -> StoredArticle {
    StoredArticle {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get::<Option<String>, _>("content").unwrap_or_default(),
        source: row.get::<Option<String>, _>("source").unwrap_or_default(),
        url: row.get::<Option<String>, _>("url").unwrap_or_default(),
        category: row.get::<Option<String>, _>("category").unwrap_or_default(),
        published_at: row.get::<Option<String>, _>("published_at").unwrap_or_default(),
        verified: row.get("verified"),
        credibility_score: row.get("credibility_score"),
        fetched_at: row.get::<Option<String>, _>("fetched_at").unwrap_or_default(),
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn insert_batch(&self, articles: &[ScoredArticle], category: &str) -> Result<u64> {
        if articles.is_empty() {
            return Ok(0);
        }

        let fetched_at = Utc::now().to_rfc3339();
        let mut accepted = 0u64;
        for scored in articles {
            // OR IGNORE absorbs the unique-url conflict; the row simply
            // does not count as accepted.
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO articles
                (title, content, source, url, category, published_at, verified, credibility_score, fetched_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&scored.article.title)
            .bind(&scored.article.description)
            .bind(&scored.article.source)
            .bind(&scored.article.url)
            .bind(category)
            .bind(&scored.article.published_at)
            .bind(scored.verified)
            .bind(scored.credibility_score)
            .bind(&fetched_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("failed to store article: {}", e)))?;

            accepted += result.rows_affected();
        }
        Ok(accepted)
    }

    async fn by_category(&self, category: &str, limit: i64) -> Result<Vec<StoredArticle>> {
        // published_at sorts as text; the provider's timestamps are
        // fixed-width ISO-8601, which keeps this chronological.
        let rows = sqlx::query(
            r#"
            SELECT * FROM articles
            WHERE category = ?
            ORDER BY published_at DESC
            LIMIT ?
            "#,
        )
        .bind(category)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to query articles: {}", e)))?;

        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn all(&self, limit: i64) -> Result<Vec<StoredArticle>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM articles
            ORDER BY published_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to query articles: {}", e)))?;

        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn update_verification(&self, id: i64, verified: bool, score: f64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE articles
            SET verified = ?, credibility_score = ?
            WHERE id = ?
            "#,
        )
        .bind(verified)
        .bind(score)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to update verification: {}", e)))?;

        Ok(())
    }
}
