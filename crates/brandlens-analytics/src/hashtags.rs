//! Hashtag extraction and per-tag engagement tallies.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::round2;
use crate::tweet::TweetRecord;

const TRENDING_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagStat {
    pub hashtag: String,
    pub count: u64,
    pub total_engagement: u64,
    pub avg_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagReport {
    /// Sorted by count descending; ties keep first-seen order.
    pub hashtags: Vec<HashtagStat>,
    pub unique_hashtags: usize,
}

impl HashtagReport {
    /// Top-10 slice of the already sorted list.
    #[must_use]
    pub fn trending(&self) -> &[HashtagStat] {
        &self.hashtags[..self.hashtags.len().min(TRENDING_LIMIT)]
    }
}

/// Tally hashtag occurrences and engagement across a tweet batch.
///
/// Tags are `#` followed by contiguous word characters, matched
/// case-sensitively; `#Promo` and `#promo` are distinct tags. Each occurrence
/// adds the whole tweet's engagement to the tag.
#[must_use]
pub fn compute_hashtags(tweets: &[TweetRecord]) -> HashtagReport {
    let re = Regex::new(r"#\w+").expect("valid hashtag regex");

    struct Tally {
        count: u64,
        total_engagement: u64,
        first_seen: usize,
    }

    let mut stats: HashMap<String, Tally> = HashMap::new();
    let mut next_rank = 0_usize;

    for tweet in tweets {
        let engagement = tweet.engagement();
        for m in re.find_iter(&tweet.text) {
            let entry = stats.entry(m.as_str().to_string()).or_insert_with(|| {
                let tally = Tally {
                    count: 0,
                    total_engagement: 0,
                    first_seen: next_rank,
                };
                next_rank += 1;
                tally
            });
            entry.count += 1;
            entry.total_engagement += engagement;
        }
    }

    let mut rows: Vec<(String, Tally)> = stats.into_iter().collect();
    rows.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.first_seen.cmp(&b.1.first_seen)));

    let hashtags: Vec<HashtagStat> = rows
        .into_iter()
        .map(|(hashtag, tally)| HashtagStat {
            hashtag,
            count: tally.count,
            total_engagement: tally.total_engagement,
            #[allow(clippy::cast_precision_loss)]
            avg_engagement: round2(tally.total_engagement as f64 / tally.count as f64),
        })
        .collect();

    HashtagReport {
        unique_hashtags: hashtags.len(),
        hashtags,
    }
}
