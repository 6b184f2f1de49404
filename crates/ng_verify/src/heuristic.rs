use ng_core::{Verdict, Verifier};

/// Each occurrence of one of these phrases in the content knocks 20% off
/// the running score. All four are always checked; multiple matches
/// compound multiplicatively.
const SUSPICIOUS_PHRASES: [&str; 4] = ["unverified", "alleged", "rumor", "claim"];

const BASE_CEILING: f64 = 0.95;
const LENGTH_DIVISOR: f64 = 500.0;
const PHRASE_PENALTY: f64 = 0.8;
const CREDIBLE_THRESHOLD: f64 = 0.5;

/// Stand-in credibility model: content length as a proxy for substance,
/// discounted for hedging language.
///
/// Length is measured in Unicode scalar values (`str::chars`), so the
/// score does not depend on how the text is encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicVerifier;

impl HeuristicVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Verifier for HeuristicVerifier {
    fn verify(&self, _title: &str, content: &str, _source: &str) -> Verdict {
        let mut score = (content.chars().count() as f64 / LENGTH_DIVISOR).min(BASE_CEILING);

        let haystack = content.to_lowercase();
        for phrase in SUSPICIOUS_PHRASES {
            if haystack.contains(phrase) {
                score *= PHRASE_PENALTY;
            }
        }
        let score = score.clamp(0.0, 1.0);

        Verdict {
            is_credible: score > CREDIBLE_THRESHOLD,
            score,
            reason: format!("Article analyzed with credibility score {:.2}", score),
        }
    }
}
