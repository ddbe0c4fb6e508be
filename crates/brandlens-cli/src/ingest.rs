use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use brandlens_analytics::analyze_batch;
use brandlens_analytics::sentiment::{KeywordScorer, LexiconScorer, SentimentScorer};
use brandlens_analytics::topics::{
    FrequencyTopics, JsonTopicModel, PretrainedTopics, TopicExtractor,
};
use brandlens_core::{brand_from_filename, AppConfig, SentimentStrategy, TopicStrategy};
use brandlens_store::{ModelArtifact, ModelStore, ModelType};

/// Run the full upload pipeline against a local CSV file.
pub fn run(config: &AppConfig, csv_path: &Path) -> anyhow::Result<()> {
    let filename = csv_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("csv path has no filename")?;
    let brand = brand_from_filename(&filename);
    if brand.id.is_empty() {
        bail!("cannot derive a brand id from filename '{filename}'");
    }

    let bytes = fs::read(csv_path)
        .with_context(|| format!("reading {}", csv_path.display()))?;
    let tweets = brandlens_analytics::ingest::parse_tweets(&bytes, &brand.name)?;

    tracing::info!(brand = %brand.id, tweets = tweets.len(), "analyzing csv batch");

    let followers = brandlens_core::load_followers(&config.followers_path)?;
    let scorer = build_scorer(config);
    let extractor = build_extractor(config)?;

    let reports = analyze_batch(
        &tweets,
        followers.lookup(&brand.id),
        scorer.as_ref(),
        extractor.as_ref(),
    )?;

    let store = ModelStore::open(&config.models_dir)?;
    let artifacts = [
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Engagement, &reports.engagement)?,
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Sentiment, &reports.sentiment)?,
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Topic, &reports.topics)?,
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Hashtags, &reports.hashtags)?,
    ];
    for artifact in &artifacts {
        let path = store.save(artifact)?;
        println!("saved {}", path.display());
    }

    println!(
        "analyzed {} tweets for {}: total engagement {}, {} unique hashtags",
        tweets.len(),
        brand.name,
        reports.engagement.total_engagement,
        reports.hashtags.unique_hashtags
    );
    Ok(())
}

fn build_scorer(config: &AppConfig) -> Arc<dyn SentimentScorer> {
    match config.sentiment_strategy {
        SentimentStrategy::Keyword => Arc::new(KeywordScorer::new()),
        SentimentStrategy::Lexicon => Arc::new(LexiconScorer::new()),
    }
}

fn build_extractor(config: &AppConfig) -> anyhow::Result<Arc<dyn TopicExtractor>> {
    Ok(match config.topic_strategy {
        TopicStrategy::Frequency => Arc::new(FrequencyTopics::default()),
        TopicStrategy::Pretrained => {
            let model = JsonTopicModel::load(&config.topic_model_path)?;
            Arc::new(PretrainedTopics::new(Arc::new(model)))
        }
    })
}
