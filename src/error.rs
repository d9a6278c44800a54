use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("period logs must be a list or null")]
    NotAList,
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}
