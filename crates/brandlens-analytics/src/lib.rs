//! Tweet-batch analytics for BrandLens.
//!
//! One validated tweet batch flows through the engagement, sentiment, topic,
//! and hashtag aggregators, producing the four reports persisted as model
//! artifacts. Sentiment and topic extraction are strategy traits so the
//! keyword/lexicon and frequency/pretrained variants stay interchangeable.

pub mod engagement;
pub mod error;
pub mod hashtags;
pub mod ingest;
pub mod pipeline;
pub mod sentiment;
pub mod topics;
pub mod tweet;

mod text;

pub use error::{AnalyticsError, IngestError};
pub use pipeline::{analyze_batch, BatchReports};
pub use tweet::TweetRecord;

/// Round to two decimal places, matching report percentage precision.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncate on a character boundary; report excerpts must never split a
/// multi-byte character.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert!((round2(41.666_666) - 41.67).abs() < f64::EPSILON);
        assert!((round2(33.333_333) - 33.33).abs() < f64::EPSILON);
    }

    #[test]
    fn truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 200), "short");
    }
}
