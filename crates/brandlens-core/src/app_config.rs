use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment classifier runs during upload and on-demand analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentStrategy {
    /// Fixed positive/negative keyword sets, substring containment.
    Keyword,
    /// Weighted lexicon with a normalized compound score.
    Lexicon,
}

/// Which topic extractor runs during upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStrategy {
    /// Corpus-frequency pseudo-topics; needs no fitted model.
    Frequency,
    /// Fitted topic model loaded from `topic_model_path` at startup.
    Pretrained,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub models_dir: PathBuf,
    pub followers_path: PathBuf,
    pub sentiment_strategy: SentimentStrategy,
    pub topic_strategy: TopicStrategy,
    pub topic_model_path: PathBuf,
}
