//! Configuration management for ansigen
//!
//! Settings are loaded from environment variables with sensible defaults and
//! may be overridden per invocation by CLI flags.
//!
//! # Environment Variables
//!
//! - `ANSIGEN_PROVIDER`: Provider selection (ollama|openai|claude|gemini|grok|groq) - default: "ollama"
//! - `ANSIGEN_MODEL`: Model name (provider-specific) - default: "qwen2.5-coder:7b" for Ollama
//! - `ANSIGEN_REQUEST_TIMEOUT`: Timeout in seconds - default: "60"
//! - `ANSIGEN_MAX_TOKENS`: Response token cap - unset by default
//! - `ANSIGEN_LOG_LEVEL`: Logging level - default: "info"
//!
//! Provider credentials and endpoints are read directly by the genai library
//! (`OLLAMA_HOST`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GOOGLE_API_KEY`,
//! `XAI_API_KEY`, `GROQ_API_KEY`).

use crate::ai::genai_backend::{GenAIBackend, Provider};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5-coder:7b";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: ollama, openai, claude, gemini, grok, groq")]
    InvalidProvider(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for ansigen
#[derive(Debug, Clone)]
pub struct AnsigenConfig {
    /// LLM provider
    pub provider: Provider,

    /// Model name to use for inference (provider-specific)
    pub model: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Optional response token cap
    pub max_tokens: Option<u32>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AnsigenConfig {
    /// Loads configuration from `ANSIGEN_*` environment variables, falling
    /// back to defaults for anything unset.
    fn default() -> Self {
        let provider = env::var("ANSIGEN_PROVIDER")
            .ok()
            .and_then(|s| parse_provider(&s).ok())
            .unwrap_or(Provider::Ollama);

        let model = env::var("ANSIGEN_MODEL")
            .ok()
            .unwrap_or_else(|| match provider {
                Provider::Ollama => DEFAULT_OLLAMA_MODEL.to_string(),
                _ => "default-model".to_string(),
            });

        let request_timeout_secs = env::var("ANSIGEN_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_tokens = env::var("ANSIGEN_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());

        let log_level = env::var("ANSIGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            request_timeout_secs,
            max_tokens,
            log_level,
        }
    }
}

impl AnsigenConfig {
    /// Validates timeout and log level ranges.
    ///
    /// Provider-specific validation (API keys, endpoints) is handled by genai
    /// when the backend makes its first call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name must not be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Creates the LLM backend for the configured provider.
    pub fn create_backend(&self) -> Arc<GenAIBackend> {
        let timeout = Duration::from_secs(self.request_timeout_secs);
        Arc::new(GenAIBackend::with_config(
            self.provider,
            self.model.clone(),
            Some(timeout),
            self.max_tokens,
        ))
    }
}

impl fmt::Display for AnsigenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ansigen Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        if let Some(max_tokens) = self.max_tokens {
            writeln!(f, "  Max Tokens: {}", max_tokens)?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

/// Parses a provider name as used by `ANSIGEN_PROVIDER` and `--provider`.
pub fn parse_provider(s: &str) -> Result<Provider, ConfigError> {
    match s.to_lowercase().as_str() {
        "ollama" => Ok(Provider::Ollama),
        "openai" => Ok(Provider::OpenAI),
        "claude" => Ok(Provider::Claude),
        "gemini" => Ok(Provider::Gemini),
        "grok" => Ok(Provider::Grok),
        "groq" => Ok(Provider::Groq),
        _ => Err(ConfigError::InvalidProvider(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("ANSIGEN_PROVIDER"),
            EnvGuard::unset("ANSIGEN_MODEL"),
            EnvGuard::unset("ANSIGEN_REQUEST_TIMEOUT"),
            EnvGuard::unset("ANSIGEN_MAX_TOKENS"),
            EnvGuard::unset("ANSIGEN_LOG_LEVEL"),
        ];

        let config = AnsigenConfig::default();

        assert_eq!(config.provider, Provider::Ollama);
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("ANSIGEN_PROVIDER", "claude"),
            EnvGuard::set("ANSIGEN_MODEL", "custom-model"),
            EnvGuard::set("ANSIGEN_REQUEST_TIMEOUT", "90"),
            EnvGuard::set("ANSIGEN_MAX_TOKENS", "2048"),
            EnvGuard::set("ANSIGEN_LOG_LEVEL", "debug"),
        ];

        let config = AnsigenConfig::default();

        assert_eq!(config.provider, Provider::Claude);
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.request_timeout_secs, 90);
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AnsigenConfig {
            provider: Provider::Ollama,
            model: "qwen2.5-coder:7b".to_string(),
            request_timeout_secs: 0,
            max_tokens: None,
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let config = AnsigenConfig {
            provider: Provider::Ollama,
            model: "qwen2.5-coder:7b".to_string(),
            request_timeout_secs: 60,
            max_tokens: None,
            log_level: "loud".to_string(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_provider_names() {
        assert_eq!(parse_provider("ollama").unwrap(), Provider::Ollama);
        assert_eq!(parse_provider("Claude").unwrap(), Provider::Claude);
        assert_eq!(parse_provider("GEMINI").unwrap(), Provider::Gemini);
        assert!(parse_provider("mistral").is_err());
    }
}
