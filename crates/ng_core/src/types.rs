use serde::{Deserialize, Serialize};

/// A headline as fetched from the provider, flattened to plain text fields.
///
/// `published_at` carries the provider's timestamp verbatim; it is never
/// parsed or validated and may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
}

/// Outcome of a credibility check for one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_credible: bool,
    pub score: f64,
    pub reason: String,
}

/// A fetched article with its verdict attached. Lives in memory only;
/// storing it is the single durable transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: RawArticle,
    pub verified: bool,
    pub credibility_score: f64,
    pub verification_reason: String,
}

/// A persisted article row. `content` holds the raw description and
/// `fetched_at` is assigned by the store at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub category: String,
    pub published_at: String,
    pub verified: bool,
    pub credibility_score: f64,
    pub fetched_at: String,
}
