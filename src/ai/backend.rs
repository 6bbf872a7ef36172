//! LLM backend abstraction
//!
//! The generation service talks to providers through the [`LLMBackend`] trait:
//! one prompt string in, one completion string out. Provider-specific plumbing
//! lives in the implementations ([`crate::ai::genai_backend::GenAIBackend`]
//! for real providers, [`crate::ai::mock::MockBackend`] for tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during backend operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Invalid or malformed response from the LLM
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// Network-related error
    NetworkError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from LLM: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// Core trait that all LLM backends must implement
///
/// A backend turns one prompt into one completion. Transport, authentication
/// and model selection are implementation concerns; callers only see the text
/// and [`BackendError`].
#[async_trait]
pub trait LLMBackend: Send + Sync {
    /// Sends one prompt and returns the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the API call fails, times out, or the
    /// response carries no text content.
    async fn complete(&self, prompt: String) -> Result<String, BackendError>;

    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Returns optional model information for this backend.
    fn model_info(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let error = BackendError::ApiError {
            message: "Test error".to_string(),
            status_code: Some(500),
        };
        assert!(error.to_string().contains("500"));
        assert!(error.to_string().contains("Test error"));

        let error = BackendError::TimeoutError { seconds: 30 };
        assert_eq!(error.to_string(), "Request timed out after 30 seconds");

        let error = BackendError::ConfigurationError {
            message: "missing key".to_string(),
        };
        assert!(error.to_string().contains("missing key"));
    }
}
