//! Error types and handling for Research Analyst Core

use thiserror::Error;

/// Result type alias for Research Analyst operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Research Analyst Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing or invalid credentials
    #[error("{0}")]
    Credential(#[from] CredentialError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Any failure raised while building the embedding model
    #[error("Error loading embedding model: {0}")]
    EmbeddingLoad(String),

    /// Any failure raised while building the chat model
    #[error("Error loading LLM model: {0}")]
    LlmLoad(String),

    /// Async runtime errors
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("LLM provider '{provider}' not found in configuration.")]
    ProviderNotConfigured { provider: String },

    #[error("Unsupported LLM provider: {provider}")]
    UnsupportedProvider { provider: String },
}

/// Credential errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("{key} is not set in environment variables.")]
    Missing { key: String },
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },
}

impl Error {
    /// Message of the underlying failure, without the category prefix
    pub fn detail(&self) -> String {
        match self {
            Error::Config(inner) => inner.to_string(),
            Error::Llm(inner) => inner.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_carry_original_message() {
        let inner: Error = ConfigError::ProviderNotConfigured {
            provider: "unknown-provider".to_string(),
        }
        .into();
        let wrapped = Error::LlmLoad(inner.detail());

        assert_eq!(
            wrapped.to_string(),
            "Error loading LLM model: LLM provider 'unknown-provider' not found in configuration."
        );
    }

    #[test]
    fn test_missing_credential_message() {
        let err: Error = CredentialError::Missing {
            key: "GROQ_API_KEY".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "GROQ_API_KEY is not set in environment variables.");
    }
}
