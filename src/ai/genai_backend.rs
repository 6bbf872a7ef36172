//! GenAI multi-provider LLM client
//!
//! Unified access to Ollama, OpenAI, Anthropic Claude, Google Gemini, xAI and
//! Groq through the `genai` crate. Credentials and custom endpoints are read
//! by genai from the standard provider environment variables (`OLLAMA_HOST`,
//! `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GOOGLE_API_KEY`, ...).

use crate::ai::backend::{BackendError, LLMBackend};
use async_trait::async_trait;
use clap::ValueEnum;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use genai::Client;
use std::time::Duration;
use tracing::{debug, error, info};

/// Supported LLM providers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Ollama local inference
    Ollama,
    /// OpenAI GPT models
    OpenAI,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
    /// xAI Grok
    Grok,
    /// Groq
    Groq,
}

impl Provider {
    /// Returns the provider prefix for genai model strings
    fn prefix(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenAI => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Grok => "grok",
            Provider::Groq => "groq",
        }
    }

    /// Returns the provider name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Ollama => "Ollama",
            Provider::OpenAI => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Gemini => "Gemini",
            Provider::Grok => "Grok",
            Provider::Groq => "Groq",
        }
    }

    /// Environment variable holding the provider's API key, if it needs one.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            Provider::Ollama => None,
            Provider::OpenAI => Some("OPENAI_API_KEY"),
            Provider::Claude => Some("ANTHROPIC_API_KEY"),
            Provider::Gemini => Some("GOOGLE_API_KEY"),
            Provider::Grok => Some("XAI_API_KEY"),
            Provider::Groq => Some("GROQ_API_KEY"),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// GenAI-based LLM backend supporting multiple providers
///
/// Thread-safe; share across tasks with `Arc`.
pub struct GenAIBackend {
    /// GenAI client instance
    client: Client,

    /// Full model identifier (e.g., "ollama:qwen2.5-coder:7b")
    model: String,

    /// Provider type
    provider: Provider,

    /// Request timeout
    timeout: Duration,

    /// Maximum tokens for response
    max_tokens: Option<u32>,
}

impl GenAIBackend {
    /// Creates a backend with default timeout and no token cap.
    pub fn new(provider: Provider, model: String) -> Self {
        Self::with_config(provider, model, None, None)
    }

    /// Creates a backend with custom timeout and token cap.
    pub fn with_config(
        provider: Provider,
        model: String,
        timeout: Option<Duration>,
        max_tokens: Option<u32>,
    ) -> Self {
        let full_model = format!("{}:{}", provider.prefix(), model);

        debug!(
            "Creating GenAI backend: provider={}, model={}",
            provider.name(),
            model,
        );

        Self {
            client: Client::default(),
            model: full_model,
            provider,
            timeout: timeout.unwrap_or(Duration::from_secs(60)),
            max_tokens,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }
}

#[async_trait]
impl LLMBackend for GenAIBackend {
    async fn complete(&self, prompt: String) -> Result<String, BackendError> {
        let chat_req = ChatRequest::new(vec![ChatMessage::user(prompt.clone())]);

        let mut options = ChatOptions::default().with_temperature(0.3);
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        debug!(
            "Sending request to {}: prompt_length={}",
            self.provider.name(),
            prompt.len()
        );

        let start = std::time::Instant::now();

        let exec = self.client.exec_chat(&self.model, chat_req, Some(&options));
        let response = tokio::time::timeout(self.timeout, exec)
            .await
            .map_err(|_| {
                error!(
                    "{} request exceeded {}s timeout",
                    self.provider.name(),
                    self.timeout.as_secs()
                );
                BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                }
            })?
            .map_err(|e| {
                error!("{} API error: {}", self.provider.name(), e);
                BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.name(), e),
                    status_code: None,
                }
            })?;

        info!(
            "{} generation completed in {:.2}s",
            self.provider.name(),
            start.elapsed().as_secs_f64()
        );

        let content = response
            .first_text()
            .ok_or_else(|| {
                error!("No text content in {} response", self.provider.name());
                BackendError::InvalidResponse {
                    message: "No text content in response".to_string(),
                    raw_response: None,
                }
            })?
            .to_string();

        debug!(
            "{} response length: {} characters",
            self.provider.name(),
            content.len()
        );

        Ok(content)
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIBackend")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
