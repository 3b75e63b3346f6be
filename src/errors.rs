use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid collection: {0}")]
    InvalidCollection(String),

    #[error("feature disabled: {0}")]
    FeatureDisabled(String),

    #[error("Logging error: {0}")]
    Logging(String),
}
