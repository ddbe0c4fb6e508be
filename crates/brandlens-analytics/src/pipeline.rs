//! Batch orchestration: one validated tweet batch in, four reports out.

use crate::engagement::{compute_engagement, EngagementReport};
use crate::error::AnalyticsError;
use crate::hashtags::{compute_hashtags, HashtagReport};
use crate::sentiment::{compute_sentiment, SentimentReport, SentimentScorer};
use crate::topics::{TopicExtractor, TopicReport};
use crate::tweet::TweetRecord;

/// The four analytic views computed from the same batch at the same instant.
#[derive(Debug, Clone)]
pub struct BatchReports {
    pub engagement: EngagementReport,
    pub sentiment: SentimentReport,
    pub topics: TopicReport,
    pub hashtags: HashtagReport,
}

/// Run all four aggregators over one batch.
///
/// Aggregators are pure over the input slice, so re-running the identical
/// batch reproduces identical reports.
///
/// # Errors
///
/// Returns [`AnalyticsError`] when the topic extractor's upstream model is
/// missing or invalid; the engagement, sentiment, and hashtag views cannot
/// fail.
pub fn analyze_batch(
    tweets: &[TweetRecord],
    followers: Option<u64>,
    scorer: &dyn SentimentScorer,
    topics: &dyn TopicExtractor,
) -> Result<BatchReports, AnalyticsError> {
    tracing::info!(
        tweets = tweets.len(),
        sentiment = scorer.name(),
        topics = topics.name(),
        "running analytics batch"
    );

    Ok(BatchReports {
        engagement: compute_engagement(tweets, followers),
        sentiment: compute_sentiment(tweets, scorer),
        topics: topics.extract(tweets)?,
        hashtags: compute_hashtags(tweets),
    })
}
