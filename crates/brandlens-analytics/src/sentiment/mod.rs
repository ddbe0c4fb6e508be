//! Sentiment classification over a tweet batch.
//!
//! Two interchangeable scorers sit behind [`SentimentScorer`]: a keyword
//! majority vote and a weighted lexicon with a normalized compound score.
//! The on-demand analyze endpoint must call the same scorer instance used at
//! upload time so batch and real-time paths never drift.

mod keyword;
mod lexicon;

use serde::{Deserialize, Serialize};

use crate::tweet::TweetRecord;
use crate::{round2, truncate_chars};

pub use keyword::KeywordScorer;
pub use lexicon::LexiconScorer;

const EXAMPLE_LIMIT: usize = 5;
const EXAMPLE_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// One classification outcome: label plus the raw strategy score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub score: f64,
}

/// A sentiment classification strategy.
///
/// Implementations must be pure functions of the input text; the identical
/// scorer serves batch uploads and single-text analysis.
pub trait SentimentScorer: Send + Sync {
    /// Stable strategy name, surfaced in reports and API responses.
    fn name(&self) -> &'static str;

    fn score(&self, text: &str) -> SentimentScore;

    /// Whether `score` is a normalized compound value worth averaging.
    fn has_compound(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentExample {
    pub id_str: String,
    pub text: String,
    /// Favorites + retweets only; replies and quotes are excluded here.
    pub engagement: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub strategy: String,
    pub total_tweets: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
    pub positive_examples: Vec<SentimentExample>,
    pub neutral_examples: Vec<SentimentExample>,
    pub negative_examples: Vec<SentimentExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_compound: Option<f64>,
}

/// Classify every tweet in the batch and aggregate per-class tallies.
///
/// Percentages are 2-decimal shares of the total, 0 for an empty batch. Up
/// to five example tweets are kept per class in input order.
#[must_use]
pub fn compute_sentiment(tweets: &[TweetRecord], scorer: &dyn SentimentScorer) -> SentimentReport {
    let mut report = SentimentReport {
        strategy: scorer.name().to_string(),
        total_tweets: tweets.len(),
        positive: 0,
        neutral: 0,
        negative: 0,
        positive_pct: 0.0,
        neutral_pct: 0.0,
        negative_pct: 0.0,
        positive_examples: Vec::new(),
        neutral_examples: Vec::new(),
        negative_examples: Vec::new(),
        avg_compound: None,
    };

    let mut compound_sum = 0.0_f64;

    for tweet in tweets {
        let scored = scorer.score(&tweet.text);
        compound_sum += scored.score;

        let example = SentimentExample {
            id_str: tweet.id.clone(),
            text: truncate_chars(&tweet.text, EXAMPLE_TEXT_CHARS),
            engagement: tweet.favorite_count + tweet.retweet_count,
            score: scored.score,
        };

        let (count, examples) = match scored.label {
            SentimentLabel::Positive => (&mut report.positive, &mut report.positive_examples),
            SentimentLabel::Neutral => (&mut report.neutral, &mut report.neutral_examples),
            SentimentLabel::Negative => (&mut report.negative, &mut report.negative_examples),
        };
        *count += 1;
        if examples.len() < EXAMPLE_LIMIT {
            examples.push(example);
        }
    }

    if !tweets.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let total = tweets.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let pct = |n: usize| round2(n as f64 / total * 100.0);
        report.positive_pct = pct(report.positive);
        report.neutral_pct = pct(report.neutral);
        report.negative_pct = pct(report.negative);

        if scorer.has_compound() {
            report.avg_compound = Some(round2(compound_sum / total));
        }
    }

    report
}
