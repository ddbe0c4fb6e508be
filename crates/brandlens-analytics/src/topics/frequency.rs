//! First-letter frequency clustering: pseudo-topics without a fitted model.

use crate::error::AnalyticsError;
use crate::tweet::TweetRecord;

use super::{corpus_word_counts, topic_label, Topic, TopicExtractor, TopicReport};

const TOP_WORD_POOL: usize = 50;
const WORDS_PER_TOPIC: usize = 5;
const TOP_KEYWORD_LIMIT: usize = 20;

/// Groups the 50 most frequent corpus words by first letter into
/// pseudo-topics, keeping groups in first-appearance order.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyTopics {
    num_topics: usize,
}

impl FrequencyTopics {
    #[must_use]
    pub fn new(num_topics: usize) -> Self {
        Self { num_topics }
    }
}

impl Default for FrequencyTopics {
    fn default() -> Self {
        Self::new(5)
    }
}

impl TopicExtractor for FrequencyTopics {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn extract(&self, tweets: &[TweetRecord]) -> Result<TopicReport, AnalyticsError> {
        let (ordered, total_unique_words) = corpus_word_counts(tweets);
        let top_words = &ordered[..ordered.len().min(TOP_WORD_POOL)];

        // Group by first letter, groups appearing in the order their letter
        // first shows up in the frequency-ranked list.
        let mut groups: Vec<(char, Vec<(String, u64)>)> = Vec::new();
        for (word, count) in top_words {
            let Some(first) = word.chars().next() else {
                continue;
            };
            match groups.iter_mut().find(|(letter, _)| *letter == first) {
                Some((_, members)) => members.push((word.clone(), *count)),
                None => groups.push((first, vec![(word.clone(), *count)])),
            }
        }

        let topics = groups
            .into_iter()
            .take(self.num_topics)
            .enumerate()
            .map(|(id, (_, mut members))| {
                members.sort_by(|a, b| b.1.cmp(&a.1));
                members.truncate(WORDS_PER_TOPIC);

                let keywords: Vec<String> = members.iter().map(|(w, _)| w.clone()).collect();
                #[allow(clippy::cast_precision_loss)]
                let weights: Vec<f64> = members.iter().map(|(_, c)| *c as f64).collect();
                let tweet_count: u64 = members.iter().map(|(_, c)| c).sum();

                Topic {
                    id,
                    label: topic_label(id, &keywords),
                    keywords,
                    weights,
                    tweet_count,
                }
            })
            .collect();

        Ok(TopicReport {
            strategy: self.name().to_string(),
            topics,
            total_tweets: tweets.len(),
            total_unique_words,
            top_keywords: top_words
                .iter()
                .take(TOP_KEYWORD_LIMIT)
                .map(|(w, _)| w.clone())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_tweet;
    use super::*;

    #[test]
    fn empty_batch_yields_empty_report() {
        let report = FrequencyTopics::default().extract(&[]).unwrap();
        assert!(report.topics.is_empty());
        assert_eq!(report.total_tweets, 0);
        assert_eq!(report.total_unique_words, 0);
        assert!(report.top_keywords.is_empty());
    }

    #[test]
    fn groups_words_by_first_letter() {
        let tweets = vec![
            test_tweet("1", "stream stream stream series series show"),
            test_tweet("2", "premiere premiere plot"),
        ];
        let report = FrequencyTopics::default().extract(&tweets).unwrap();
        // Two groups: 's' (stream, series, show) and 'p' (premiere, plot).
        assert_eq!(report.topics.len(), 2);
        let s_topic = &report.topics[0];
        assert_eq!(s_topic.keywords, vec!["stream", "series", "show"]);
        assert_eq!(s_topic.weights, vec![3.0, 2.0, 1.0]);
        assert_eq!(s_topic.tweet_count, 6);
        assert_eq!(s_topic.label, "Topic 1: stream + series + show");

        let p_topic = &report.topics[1];
        assert_eq!(p_topic.keywords, vec!["premiere", "plot"]);
        assert_eq!(p_topic.label, "Topic 2: premiere + plot");
    }

    #[test]
    fn topic_count_capped_by_configuration() {
        let tweets = vec![test_tweet(
            "1",
            "alpha bravo charlie delta echo foxtrot golf hotel",
        )];
        let report = FrequencyTopics::new(3).extract(&tweets).unwrap();
        assert_eq!(report.topics.len(), 3);
    }

    #[test]
    fn keywords_capped_at_five_per_topic() {
        let tweets = vec![test_tweet(
            "1",
            "salsa sauce songs scene snack strange sunny",
        )];
        let report = FrequencyTopics::default().extract(&tweets).unwrap();
        assert_eq!(report.topics.len(), 1);
        assert_eq!(report.topics[0].keywords.len(), 5);
        assert_eq!(report.topics[0].weights.len(), 5);
    }

    #[test]
    fn top_keywords_capped_at_twenty() {
        let text: String = (0..30).map(|i| format!("word{i:02}xx ")).collect();
        let tweets = vec![test_tweet("1", &text)];
        let report = FrequencyTopics::default().extract(&tweets).unwrap();
        assert_eq!(report.top_keywords.len(), 20);
        assert_eq!(report.total_unique_words, 30);
    }
}
