//! Engagement rollups: totals, per-day trend, hour-of-day buckets, top tweets.

use std::collections::BTreeMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::tweet::TweetRecord;
use crate::{round2, truncate_chars};

const TOP_TWEET_LIMIT: usize = 10;
const TOP_TWEET_TEXT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub engagement: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPoint {
    pub hour: u8,
    pub engagement: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTweet {
    pub id_str: String,
    pub text: String,
    pub engagement: u64,
    pub favorite_count: u64,
    pub retweet_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub total_tweets: usize,
    pub total_engagement: u64,
    pub avg_engagement: f64,
    /// Dimensionless rate; the formula depends on follower availability, so
    /// rates computed with and without followers are not comparable.
    pub engagement_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    pub trend: Vec<TrendPoint>,
    pub posting_hours: Vec<HourPoint>,
    pub top_tweets: Vec<TopTweet>,
}

/// Aggregate engagement for one tweet batch.
///
/// Timestamps that fail to parse keep their tweet in the totals but skip the
/// date/hour rollups. Date buckets are UTC calendar dates; hour buckets are
/// the fixed 24 UTC hours. An empty batch yields an all-zero report with
/// empty sequences.
#[must_use]
pub fn compute_engagement(tweets: &[TweetRecord], followers: Option<u64>) -> EngagementReport {
    if tweets.is_empty() {
        return EngagementReport {
            total_tweets: 0,
            total_engagement: 0,
            avg_engagement: 0.0,
            engagement_rate: 0.0,
            followers,
            trend: Vec::new(),
            posting_hours: Vec::new(),
            top_tweets: Vec::new(),
        };
    }

    let total_tweets = tweets.len();
    let mut total_engagement: u64 = 0;
    let mut by_date: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_hour = [0_u64; 24];
    let mut ranked: Vec<TopTweet> = Vec::with_capacity(total_tweets);
    let mut unparsed = 0_usize;

    for tweet in tweets {
        let engagement = tweet.engagement();
        total_engagement += engagement;

        match tweet.timestamp() {
            Some(ts) => {
                *by_date.entry(ts.date_naive().to_string()).or_insert(0) += engagement;
                by_hour[ts.hour() as usize] += engagement;
            }
            None => unparsed += 1,
        }

        ranked.push(TopTweet {
            id_str: tweet.id.clone(),
            text: truncate_chars(&tweet.text, TOP_TWEET_TEXT_CHARS),
            engagement,
            favorite_count: tweet.favorite_count,
            retweet_count: tweet.retweet_count,
        });
    }

    if unparsed > 0 {
        tracing::warn!(
            unparsed,
            total = total_tweets,
            "tweets with unparseable timestamps excluded from date/hour rollups"
        );
    }

    // Stable sort keeps input order for equal engagement.
    ranked.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    ranked.truncate(TOP_TWEET_LIMIT);

    #[allow(clippy::cast_precision_loss)]
    let count = total_tweets as f64;
    #[allow(clippy::cast_precision_loss)]
    let total = total_engagement as f64;
    let avg = total / count;
    let rate = match followers {
        #[allow(clippy::cast_precision_loss)]
        Some(f) if f > 0 => total / f as f64 / count * 100.0,
        _ => avg / count * 100.0,
    };
    let (avg_engagement, engagement_rate) = (round2(avg), round2(rate));

    EngagementReport {
        total_tweets,
        total_engagement,
        avg_engagement,
        engagement_rate,
        followers,
        trend: by_date
            .into_iter()
            .map(|(date, engagement)| TrendPoint { date, engagement })
            .collect(),
        posting_hours: (0..24)
            .map(|hour| HourPoint {
                #[allow(clippy::cast_possible_truncation)]
                hour: hour as u8,
                engagement: by_hour[hour],
            })
            .collect(),
        top_tweets: ranked,
    }
}
