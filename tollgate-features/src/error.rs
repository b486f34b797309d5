// Error types for feature management

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Feature filter not found: {filter} (required by feature {feature})")]
    FilterNotFound { filter: String, feature: String },

    #[error("Failed to load feature declarations: {0}")]
    LoadError(String),

    #[error("Failed to parse feature declarations: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
