//! Keyword majority-vote sentiment.

use super::{SentimentLabel, SentimentScore, SentimentScorer};

/// Fixed keyword sets, matched by lower-cased substring containment rather
/// than tokenized, so "loved" counts a "love" hit.
const POSITIVE_KEYWORDS: &[&str] = &[
    "amazing",
    "love",
    "great",
    "awesome",
    "excellent",
    "fantastic",
    "wonderful",
    "beautiful",
    "best",
    "happy",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "hate",
    "bad",
    "terrible",
    "awful",
    "worst",
    "horrible",
    "disappointing",
    "poor",
    "sad",
    "angry",
];

/// Majority vote between positive and negative keyword hits; ties are
/// neutral. Score is the signed hit difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for KeywordScorer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn score(&self, text: &str) -> SentimentScore {
        let lower = text.to_lowercase();
        let positive = POSITIVE_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count();
        let negative = NEGATIVE_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count();

        let label = match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => SentimentLabel::Positive,
            std::cmp::Ordering::Less => SentimentLabel::Negative,
            std::cmp::Ordering::Equal => SentimentLabel::Neutral,
        };

        #[allow(clippy::cast_precision_loss)]
        let score = positive as f64 - negative as f64;
        SentimentScore { label, score }
    }
}
