//! Topic extraction over a tweet batch.
//!
//! Two interchangeable extractors sit behind [`TopicExtractor`]: first-letter
//! frequency clustering (no fitted model) and a pretrained topic model
//! injected behind [`TopicModel`] so tests can mock it.

mod frequency;
mod pretrained;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::text::{strip_noise, word_tokens};
use crate::tweet::TweetRecord;

pub use frequency::FrequencyTopics;
pub use pretrained::{JsonTopicModel, PretrainedTopics, TopicModel};

/// Stand-in used when the pretrained strategy is configured but its model
/// artifact could not be loaded at startup: every extraction fails with the
/// service-unavailable condition instead of silently degrading.
#[derive(Debug, Clone)]
pub struct UnavailableTopics {
    path: String,
}

impl UnavailableTopics {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl TopicExtractor for UnavailableTopics {
    fn name(&self) -> &'static str {
        "pretrained"
    }

    fn extract(&self, _tweets: &[TweetRecord]) -> Result<TopicReport, AnalyticsError> {
        Err(AnalyticsError::TopicModelUnavailable {
            path: self.path.clone(),
        })
    }
}

/// Words too common to carry topical signal.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "as", "by", "that", "this",
];

/// Tokens must be longer than this to count.
const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    /// Human label: `"Topic {i+1}: {top 3 keywords joined by ' + '}"`.
    pub label: String,
    pub keywords: Vec<String>,
    /// Parallel to `keywords`.
    pub weights: Vec<f64>,
    pub tweet_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub strategy: String,
    pub topics: Vec<Topic>,
    pub total_tweets: usize,
    pub total_unique_words: usize,
    pub top_keywords: Vec<String>,
}

/// A topic extraction strategy.
pub trait TopicExtractor: Send + Sync {
    /// Stable strategy name, surfaced in reports and API responses.
    fn name(&self) -> &'static str;

    /// Derive the topic report for one batch.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] when a required upstream model is missing
    /// or invalid.
    fn extract(&self, tweets: &[TweetRecord]) -> Result<TopicReport, AnalyticsError>;
}

/// Generate the display label for a topic from its strongest keywords.
pub(crate) fn topic_label(index: usize, keywords: &[String]) -> String {
    let top3 = keywords
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" + ");
    format!("Topic {}: {}", index + 1, top3)
}

/// Corpus-wide word frequencies after cleaning and stop-word removal,
/// ordered by count descending with first-seen tie order.
///
/// Returns the ordered `(word, count)` list and the number of distinct words.
pub(crate) fn corpus_word_counts(tweets: &[TweetRecord]) -> (Vec<(String, u64)>, usize) {
    struct Seen {
        count: u64,
        first_seen: usize,
    }

    let mut counts: HashMap<String, Seen> = HashMap::new();
    let mut next_rank = 0_usize;

    for tweet in tweets {
        let cleaned = strip_noise(&tweet.text);
        for word in word_tokens(&cleaned) {
            if word.chars().count() <= MIN_WORD_LEN || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            let entry = counts.entry(word).or_insert_with(|| {
                let seen = Seen {
                    count: 0,
                    first_seen: next_rank,
                };
                next_rank += 1;
                seen
            });
            entry.count += 1;
        }
    }

    let unique = counts.len();
    let mut ordered: Vec<(String, Seen)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.first_seen.cmp(&b.1.first_seen)));

    (
        ordered.into_iter().map(|(w, s)| (w, s.count)).collect(),
        unique,
    )
}

#[cfg(test)]
pub(crate) fn test_tweet(id: &str, text: &str) -> TweetRecord {
    TweetRecord {
        id: id.to_string(),
        text: text.to_string(),
        created_at: String::new(),
        username: "brand".to_string(),
        favorite_count: 0,
        retweet_count: 0,
        reply_count: 0,
        quote_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_counts_drop_stop_words_and_short_words() {
        let tweets = vec![test_tweet("1", "the show that show is fun fun fun")];
        let (words, unique) = corpus_word_counts(&tweets);
        // "the"/"that"/"is" are stop words, "fun" has length 3 and is dropped.
        assert_eq!(words, vec![("show".to_string(), 2)]);
        assert_eq!(unique, 1);
    }

    #[test]
    fn corpus_counts_order_by_frequency_then_first_seen() {
        let tweets = vec![
            test_tweet("1", "alpha bravo bravo"),
            test_tweet("2", "alpha delta"),
        ];
        let (words, _) = corpus_word_counts(&tweets);
        assert_eq!(words[0].0, "alpha");
        assert_eq!(words[0].1, 2);
        assert_eq!(words[1].0, "bravo");
        assert_eq!(words[2].0, "delta");
    }

    #[test]
    fn corpus_counts_ignore_urls_and_mentions() {
        let tweets = vec![test_tweet("1", "https://example.com/watch @someone premiere")];
        let (words, _) = corpus_word_counts(&tweets);
        assert_eq!(words, vec![("premiere".to_string(), 1)]);
    }

    #[test]
    fn topic_label_joins_top_three() {
        let kws = vec![
            "stream".to_string(),
            "series".to_string(),
            "season".to_string(),
            "show".to_string(),
        ];
        assert_eq!(topic_label(0, &kws), "Topic 1: stream + series + season");
    }
}
