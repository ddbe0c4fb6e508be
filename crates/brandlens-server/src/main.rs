mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use brandlens_analytics::sentiment::{KeywordScorer, LexiconScorer, SentimentScorer};
use brandlens_analytics::topics::{
    FrequencyTopics, JsonTopicModel, PretrainedTopics, TopicExtractor, UnavailableTopics,
};
use brandlens_core::{AppConfig, SentimentStrategy, TopicStrategy};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brandlens_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = brandlens_store::ModelStore::open(&config.models_dir)?;
    let followers = Arc::new(brandlens_core::load_followers(&config.followers_path)?);

    let state = AppState {
        store,
        followers,
        sentiment: build_sentiment_scorer(&config),
        topics: build_topic_extractor(&config),
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting brandlens server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_sentiment_scorer(config: &AppConfig) -> Arc<dyn SentimentScorer> {
    match config.sentiment_strategy {
        SentimentStrategy::Keyword => Arc::new(KeywordScorer::new()),
        SentimentStrategy::Lexicon => Arc::new(LexiconScorer::new()),
    }
}

fn build_topic_extractor(config: &AppConfig) -> Arc<dyn TopicExtractor> {
    match config.topic_strategy {
        TopicStrategy::Frequency => Arc::new(FrequencyTopics::default()),
        TopicStrategy::Pretrained => match JsonTopicModel::load(&config.topic_model_path) {
            Ok(model) => Arc::new(PretrainedTopics::new(Arc::new(model))),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %config.topic_model_path.display(),
                    "pretrained topic model unavailable; uploads will fail topic extraction"
                );
                Arc::new(UnavailableTopics::new(
                    config.topic_model_path.display().to_string(),
                ))
            }
        },
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
