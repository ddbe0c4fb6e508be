//! Dominant-topic assignment from an externally fitted topic model.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::AnalyticsError;
use crate::text::{strip_noise, word_tokens};
use crate::tweet::TweetRecord;

use super::{corpus_word_counts, topic_label, Topic, TopicExtractor, TopicReport};

const REPORTED_TOPIC_LIMIT: usize = 5;
const KEYWORDS_PER_TOPIC: usize = 10;
const TOP_KEYWORD_LIMIT: usize = 20;

/// An already-fitted topic model: vectorizer plus topic decomposition.
///
/// Injected as explicit state so extraction can be exercised with a mock.
pub trait TopicModel: Send + Sync {
    fn num_topics(&self) -> usize;

    /// Term-feature vector for one text.
    fn vectorize(&self, text: &str) -> Vec<f32>;

    /// Per-topic weight distribution for a feature vector. An all-zero
    /// result means the model has no opinion on the text.
    fn topic_distribution(&self, features: &[f32]) -> Vec<f32>;

    /// The `top_n` strongest `(term, weight)` pairs for a topic, weight
    /// descending.
    fn topic_terms(&self, topic: usize, top_n: usize) -> Vec<(String, f64)>;
}

/// Serialized form of a fitted model: vocabulary plus a topic-term weight
/// matrix, one row per topic.
#[derive(Debug, Deserialize)]
struct TopicModelFile {
    vocabulary: Vec<String>,
    topic_term_weights: Vec<Vec<f32>>,
}

/// A fitted topic model loaded from a JSON artifact at process start.
#[derive(Debug)]
pub struct JsonTopicModel {
    vocabulary: Vec<String>,
    vocab_index: HashMap<String, usize>,
    topic_term_weights: Vec<Vec<f32>>,
}

impl JsonTopicModel {
    /// Load and validate the model artifact.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::TopicModelUnavailable`] when the file does not
    /// exist, [`AnalyticsError::TopicModelInvalid`] when it parses but is
    /// internally inconsistent.
    pub fn load(path: &Path) -> Result<Self, AnalyticsError> {
        if !path.exists() {
            return Err(AnalyticsError::TopicModelUnavailable {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let file: TopicModelFile = serde_json::from_str(&content)
            .map_err(|e| AnalyticsError::TopicModelInvalid(e.to_string()))?;

        if file.vocabulary.is_empty() {
            return Err(AnalyticsError::TopicModelInvalid(
                "vocabulary is empty".to_string(),
            ));
        }
        if file.topic_term_weights.is_empty() {
            return Err(AnalyticsError::TopicModelInvalid(
                "no topic rows".to_string(),
            ));
        }
        for (i, row) in file.topic_term_weights.iter().enumerate() {
            if row.len() != file.vocabulary.len() {
                return Err(AnalyticsError::TopicModelInvalid(format!(
                    "topic row {i} has {} weights for {} vocabulary terms",
                    row.len(),
                    file.vocabulary.len()
                )));
            }
        }

        let vocab_index = file
            .vocabulary
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        tracing::info!(
            path = %path.display(),
            topics = file.topic_term_weights.len(),
            vocabulary = file.vocabulary.len(),
            "loaded pretrained topic model"
        );

        Ok(Self {
            vocabulary: file.vocabulary,
            vocab_index,
            topic_term_weights: file.topic_term_weights,
        })
    }
}

impl TopicModel for JsonTopicModel {
    fn num_topics(&self) -> usize {
        self.topic_term_weights.len()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0_f32; self.vocabulary.len()];
        let cleaned = strip_noise(text);
        for token in word_tokens(&cleaned) {
            if let Some(&i) = self.vocab_index.get(&token) {
                features[i] += 1.0;
            }
        }
        features
    }

    fn topic_distribution(&self, features: &[f32]) -> Vec<f32> {
        let mut weights: Vec<f32> = self
            .topic_term_weights
            .iter()
            .map(|row| row.iter().zip(features).map(|(w, f)| w * f).sum())
            .collect();

        let total: f32 = weights.iter().sum();
        if total > 0.0 {
            for w in &mut weights {
                *w /= total;
            }
        }
        weights
    }

    fn topic_terms(&self, topic: usize, top_n: usize) -> Vec<(String, f64)> {
        let Some(row) = self.topic_term_weights.get(topic) else {
            return Vec::new();
        };
        let mut indexed: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed
            .into_iter()
            .take(top_n)
            .map(|(i, w)| (self.vocabulary[i].clone(), f64::from(w)))
            .collect()
    }
}

/// Extractor that assigns each tweet its dominant topic under an injected
/// fitted model.
pub struct PretrainedTopics {
    model: Arc<dyn TopicModel>,
}

impl PretrainedTopics {
    #[must_use]
    pub fn new(model: Arc<dyn TopicModel>) -> Self {
        Self { model }
    }
}

impl TopicExtractor for PretrainedTopics {
    fn name(&self) -> &'static str {
        "pretrained"
    }

    fn extract(&self, tweets: &[TweetRecord]) -> Result<TopicReport, AnalyticsError> {
        let num_topics = self.model.num_topics();
        let mut dominant_counts = vec![0_u64; num_topics];

        for tweet in tweets {
            let features = self.model.vectorize(&tweet.text);
            let distribution = self.model.topic_distribution(&features);

            // All-zero distributions carry no dominant topic.
            let dominant = distribution
                .iter()
                .enumerate()
                .filter(|(_, w)| **w > 0.0)
                .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(&a.0)));
            if let Some((topic, _)) = dominant {
                dominant_counts[topic] += 1;
            }
        }

        // Pick the most-frequently-dominant topics, then report them in the
        // model's original topic order rather than by frequency.
        let mut by_count: Vec<usize> = (0..num_topics).collect();
        by_count.sort_by(|&a, &b| dominant_counts[b].cmp(&dominant_counts[a]).then(a.cmp(&b)));
        let mut selected: Vec<usize> = by_count.into_iter().take(REPORTED_TOPIC_LIMIT).collect();
        selected.sort_unstable();

        let topics = selected
            .into_iter()
            .map(|topic| {
                let terms = self.model.topic_terms(topic, KEYWORDS_PER_TOPIC);
                let keywords: Vec<String> = terms.iter().map(|(t, _)| t.clone()).collect();
                let weights: Vec<f64> = terms.iter().map(|(_, w)| *w).collect();
                Topic {
                    id: topic,
                    label: topic_label(topic, &keywords),
                    keywords,
                    weights,
                    tweet_count: dominant_counts[topic],
                }
            })
            .collect();

        let (corpus, total_unique_words) = corpus_word_counts(tweets);

        Ok(TopicReport {
            strategy: self.name().to_string(),
            topics,
            total_tweets: tweets.len(),
            total_unique_words,
            top_keywords: corpus
                .into_iter()
                .take(TOP_KEYWORD_LIMIT)
                .map(|(w, _)| w)
                .collect(),
        })
    }
}
