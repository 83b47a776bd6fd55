//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Chart catalog not found: {path}")]
    CatalogNotFound { path: String },

    #[error("Invalid chart catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Chart type already declared: {type_token}")]
    DuplicateChart { type_token: String },

    #[error("No chart declared for type: {type_token}")]
    ChartNotFound { type_token: String },

    #[error("Invalid repository URL: {url} - {reason}")]
    InvalidRepositoryUrl { url: String, reason: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Values error: {message}")]
    Values { message: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
