//! Weighted-lexicon sentiment with a normalized compound score.

use super::{SentimentLabel, SentimentScore, SentimentScorer};
use crate::text::clean_for_lexicon;

/// Word weights for brand-conversation sentiment.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.6),
    ("love", 0.6),
    ("loved", 0.6),
    ("great", 0.5),
    ("awesome", 0.6),
    ("excellent", 0.6),
    ("fantastic", 0.6),
    ("wonderful", 0.6),
    ("beautiful", 0.5),
    ("best", 0.5),
    ("happy", 0.5),
    ("good", 0.4),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("fun", 0.4),
    ("perfect", 0.6),
    ("recommend", 0.4),
    ("favorite", 0.5),
    ("win", 0.3),
    ("thanks", 0.3),
    // Negative signals
    ("hate", -0.7),
    ("bad", -0.4),
    ("terrible", -0.7),
    ("awful", -0.7),
    ("worst", -0.7),
    ("horrible", -0.7),
    ("disappointing", -0.6),
    ("disappointed", -0.6),
    ("poor", -0.4),
    ("sad", -0.4),
    ("angry", -0.5),
    ("boring", -0.4),
    ("broken", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("annoying", -0.5),
    ("ugly", -0.4),
    ("scam", -0.8),
    ("slow", -0.3),
    ("cancel", -0.3),
];

/// Normalization constant; keeps the compound score in (-1, 1) while long
/// texts with many hits asymptote rather than clip.
const NORMALIZATION_ALPHA: f64 = 15.0;

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Lexicon-polarity scorer: clean the text, sum word weights, normalize to
/// [-1, 1], and classify with the ±0.05 thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> SentimentScore {
        let compound = compound_score(text);
        let label = if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        SentimentScore {
            label,
            score: compound,
        }
    }

    fn has_compound(&self) -> bool {
        true
    }
}

/// Sum lexicon weights over the cleaned text and normalize into [-1, 1].
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let cleaned = clean_for_lexicon(text);
    let mut sum = 0.0_f64;
    for word in cleaned.split_whitespace() {
        for &(lex_word, weight) in LEXICON {
            if word == lex_word {
                sum += weight;
                break;
            }
        }
    }
    if sum == 0.0 {
        return 0.0;
    }
    sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral_zero() {
        let scored = LexiconScorer::new().score("");
        assert_eq!(scored.label, SentimentLabel::Neutral);
        assert!((scored.score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_words_are_neutral() {
        let scored = LexiconScorer::new().score("the quick brown fox");
        assert_eq!(scored.label, SentimentLabel::Neutral);
    }

    #[test]
    fn positive_words_cross_threshold() {
        let scored = LexiconScorer::new().score("love this amazing show");
        assert_eq!(scored.label, SentimentLabel::Positive);
        assert!(scored.score > 0.05);
    }

    #[test]
    fn negative_words_cross_threshold() {
        let scored = LexiconScorer::new().score("terrible awful mess");
        assert_eq!(scored.label, SentimentLabel::Negative);
        assert!(scored.score < -0.05);
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let many = "amazing love great awesome excellent fantastic wonderful ".repeat(10);
        let score = compound_score(&many);
        assert!(score > 0.9 && score < 1.0, "got {score}");

        let many_neg = "hate terrible awful worst horrible ".repeat(10);
        let score = compound_score(&many_neg);
        assert!(score < -0.9 && score > -1.0, "got {score}");
    }

    #[test]
    fn urls_mentions_hashtags_do_not_score() {
        // "love" appears only inside a URL, a mention, and a hashtag.
        let scored = LexiconScorer::new().score("https://love.example @love #love");
        assert_eq!(scored.label, SentimentLabel::Neutral);
        assert!((scored.score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mixed_text_lands_between_extremes() {
        let score = compound_score("great show but terrible ending");
        assert!(score > -1.0 && score < 1.0);
    }
}
