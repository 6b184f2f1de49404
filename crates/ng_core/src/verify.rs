use crate::types::{RawArticle, ScoredArticle, Verdict};

pub trait Verifier: Send + Sync {
    /// Judge a single article. Never fails; pathological input yields a
    /// zero score, not an error.
    fn verify(&self, title: &str, content: &str, source: &str) -> Verdict;

    /// Apply [`Verifier::verify`] to every article, attaching the verdict
    /// fields. Order and count are preserved; nothing is deduplicated.
    fn verify_batch(&self, articles: Vec<RawArticle>) -> Vec<ScoredArticle> {
        articles
            .into_iter()
            .map(|article| {
                let verdict = self.verify(&article.title, &article.description, &article.source);
                ScoredArticle {
                    verified: verdict.is_credible,
                    credibility_score: verdict.score,
                    verification_reason: verdict.reason,
                    article,
                }
            })
            .collect()
    }
}
