use crate::app_config::{AppConfig, Environment, SentimentStrategy, TopicStrategy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("BRANDLENS_ENV", "development"));
    let bind_addr = parse_addr("BRANDLENS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("BRANDLENS_LOG_LEVEL", "info");
    let models_dir = PathBuf::from(or_default("BRANDLENS_MODELS_DIR", "./models"));
    let followers_path = PathBuf::from(or_default(
        "BRANDLENS_FOLLOWERS_PATH",
        "./config/followers.yaml",
    ));

    let sentiment_strategy =
        parse_sentiment_strategy(&or_default("BRANDLENS_SENTIMENT_STRATEGY", "keyword"))?;
    let topic_strategy =
        parse_topic_strategy(&or_default("BRANDLENS_TOPIC_STRATEGY", "frequency"))?;
    let topic_model_path = PathBuf::from(or_default(
        "BRANDLENS_TOPIC_MODEL_PATH",
        "./models/topic_model.json",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        models_dir,
        followers_path,
        sentiment_strategy,
        topic_strategy,
        topic_model_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_sentiment_strategy(s: &str) -> Result<SentimentStrategy, ConfigError> {
    match s {
        "keyword" => Ok(SentimentStrategy::Keyword),
        "lexicon" => Ok(SentimentStrategy::Lexicon),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDLENS_SENTIMENT_STRATEGY".to_string(),
            reason: format!("expected 'keyword' or 'lexicon', got '{other}'"),
        }),
    }
}

fn parse_topic_strategy(s: &str) -> Result<TopicStrategy, ConfigError> {
    match s {
        "frequency" => Ok(TopicStrategy::Frequency),
        "pretrained" => Ok(TopicStrategy::Pretrained),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDLENS_TOPIC_STRATEGY".to_string(),
            reason: format!("expected 'frequency' or 'pretrained', got '{other}'"),
        }),
    }
}
