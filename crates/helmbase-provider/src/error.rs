//! Error types for helmbase-provider

use thiserror::Error;

/// Result type for helmbase-provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while constructing a chart component
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The requested type token is not the one this chart declares
    #[error("unknown resource type {requested}; expected {expected}")]
    TypeMismatch { requested: String, expected: String },

    /// The inputs could not be decoded into the chart's arguments
    #[error("setting args: {0}")]
    SettingArgs(#[source] serde_json::Error),

    /// Registration or creation failed in the engine
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Release arguments could not be encoded as properties
    #[error("encoding release arguments: {0}")]
    Encode(#[source] serde_json::Error),

    /// The release reported outputs of an unexpected shape
    #[error("decoding release outputs: {0}")]
    Outputs(#[source] serde_json::Error),

    /// Chart catalog error
    #[error(transparent)]
    Core(#[from] helmbase_core::CoreError),
}

/// Errors reported by a resource engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine refused the registration
    #[error("registration of {type_token} '{name}' rejected: {message}")]
    Rejected {
        type_token: String,
        name: String,
        message: String,
    },

    /// A resource with the same URN already exists
    #[error("resource {urn} is already registered")]
    DuplicateUrn { urn: String },

    /// The parent named in the resource options is unknown
    #[error("parent resource {urn} is not registered")]
    ParentNotFound { urn: String },

    /// Outputs were registered for an unknown resource
    #[error("no resource registered as {urn}")]
    UnknownResource { urn: String },

    /// The engine could not be reached
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}
