//! Error types for st-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pipeline definition file not found
    #[error("pipeline file not found: {path}")]
    PipelineNotFound { path: String },

    /// Failed to parse a pipeline definition
    #[error("failed to parse pipeline: {message}")]
    PipelineParseError { message: String },

    /// Asset referenced by name does not exist in the pipeline
    #[error("asset not found: {name}")]
    AssetNotFound { name: String },

    /// Duplicate asset name within one pipeline
    #[error("duplicate asset name: {name}")]
    DuplicateAsset { name: String },

    /// Asset or dependency name is empty
    #[error("empty name: {context}")]
    EmptyName { context: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
