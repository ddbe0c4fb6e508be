use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("uploaded file contains no tweet rows")]
    Empty,

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("pretrained topic model not found at {path}")]
    TopicModelUnavailable { path: String },

    #[error("pretrained topic model is invalid: {0}")]
    TopicModelInvalid(String),

    #[error("failed to read topic model: {0}")]
    TopicModelIo(#[from] std::io::Error),
}
