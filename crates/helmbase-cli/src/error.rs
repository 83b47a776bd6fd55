//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use helmbase_core::CoreError;
use helmbase_provider::ProviderError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Construction of the component failed
    #[error("Construct failed: {message}")]
    #[diagnostic(code(helmbase::cli::construct))]
    Construct {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart catalog missing or invalid
    #[error("Catalog error: {message}")]
    #[diagnostic(code(helmbase::cli::catalog))]
    Catalog {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Invalid input given on the command line or in an input file
    #[error("Invalid input: {message}")]
    #[diagnostic(code(helmbase::cli::input))]
    Input { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(helmbase::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(helmbase::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Construct { .. } => exit_codes::CONSTRUCT_ERROR,
            CliError::Catalog { .. } => exit_codes::CATALOG_ERROR,
            CliError::Input { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an input error (user provided invalid input)
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a catalog error with help text
    pub fn catalog_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => e.into(),
            CoreError::Values { message } => CliError::Input { message },
            CoreError::ChartNotFound { type_token } => CliError::Catalog {
                message: format!("no chart declared for type {}", type_token),
                help: Some(format!(
                    "Declare it with `helmbase catalog add {} --chart <NAME> --repo <URL>`",
                    type_token
                )),
            },
            other => CliError::Catalog {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Core(e) => e.into(),
            ProviderError::TypeMismatch { .. } => CliError::Construct {
                message: err.to_string(),
                help: Some("Check the type token against `helmbase catalog list`".to_string()),
            },
            ProviderError::SettingArgs(_) => CliError::Construct {
                message: err.to_string(),
                help: Some("Inputs must be a mapping; `helmOptions` must be a mapping too".to_string()),
            },
            other => CliError::Construct {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::internal("boom").exit_code(), exit_codes::ERROR);
        assert_eq!(CliError::input("bad").exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(
            CliError::catalog_with_help("x", "y").exit_code(),
            exit_codes::CATALOG_ERROR
        );
    }

    #[test]
    fn test_chart_not_found_carries_help() {
        let err: CliError = ProviderError::Core(CoreError::ChartNotFound {
            type_token: "pkg:index:Chart".to_string(),
        })
        .into();

        match err {
            CliError::Catalog { message, help } => {
                assert!(message.contains("pkg:index:Chart"));
                assert!(help.unwrap().contains("helmbase catalog add"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_is_a_construct_error() {
        let err: CliError = ProviderError::TypeMismatch {
            requested: "a:b:C".to_string(),
            expected: "a:b:D".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::CONSTRUCT_ERROR);
        assert!(err.to_string().contains("unknown resource type a:b:C; expected a:b:D"));
    }
}
