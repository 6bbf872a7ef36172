//! Generation orchestration
//!
//! A thin layer over the backend: validate the requirement text, build the
//! prompt, make exactly one completion call, parse the reply. The parser never
//! fails, so the only failures surfaced here are configuration problems and
//! transport/model errors from the backend.

use crate::ai::backend::{BackendError, LLMBackend};
use crate::generation::prompt::PromptBuilder;
use crate::generation::response::parse_response;
use crate::generation::types::{GenerationOptions, GenerationResult};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during generation service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requirement text was empty or whitespace-only
    #[error("Requirements must not be empty")]
    EmptyRequirements,

    /// Backend error occurred during LLM communication
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl ServiceError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            ServiceError::EmptyRequirements => "Error: No requirements given\n\n\
                Help: Describe what the playbook should do, e.g.:\n\
                ansigen generate \"install nginx and enable the service\""
                .to_string(),
            ServiceError::Backend(backend_err) => match backend_err {
                BackendError::TimeoutError { seconds } => {
                    format!(
                        "Error: Request timeout after {} seconds\n\n\
                         Help: The LLM request took too long. Try:\n\
                         - Increase timeout: --timeout {}\n\
                         - Check network connectivity\n\
                         - Verify backend availability: ansigen health\n\
                         - Try a smaller model",
                        seconds,
                        seconds * 2
                    )
                }
                BackendError::NetworkError { message } => {
                    format!(
                        "Error: Network error\n\n\
                         Help: Cannot connect to backend. Try:\n\
                         - Check network connectivity\n\
                         - Verify backend is running: ansigen health\n\n\
                         Details: {}",
                        message
                    )
                }
                BackendError::ConfigurationError { message } => {
                    format!(
                        "Error: Backend configuration error\n\n\
                         Help: Check provider credentials and settings:\n\
                         - ANSIGEN_PROVIDER / --provider selects the provider\n\
                         - Hosted providers need their API key env var set\n\n\
                         Details: {}",
                        message
                    )
                }
                BackendError::InvalidResponse { message, .. } => {
                    format!(
                        "Error: Invalid response from LLM\n\n\
                         Help: The LLM returned an unexpected response. Try:\n\
                         - Retry the operation\n\
                         - Try a different model\n\
                         - Check backend status: ansigen health\n\n\
                         Details: {}",
                        message
                    )
                }
                other => format!("Error: {}", other),
            },
        }
    }
}

/// High-level playbook generation service
///
/// Wraps one [`LLMBackend`] and exposes the single operation the CLI needs:
/// requirements + options in, parsed steps and code blocks out.
pub struct GenerationService {
    backend: Arc<dyn LLMBackend>,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn LLMBackend>) -> Self {
        Self { backend }
    }

    /// Runs one generation call and parses the reply.
    ///
    /// Malformed model output is not an error: if the reply carries neither
    /// expected section the result simply has empty lists, and a warning is
    /// logged so the operator can inspect the model.
    pub async fn generate(
        &self,
        requirements: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResult, ServiceError> {
        if requirements.trim().is_empty() {
            return Err(ServiceError::EmptyRequirements);
        }

        let prompt = PromptBuilder::build(requirements, options);
        info!(
            backend = self.backend.name(),
            prompt_chars = prompt.len(),
            "Starting playbook generation"
        );

        let start = Instant::now();
        let reply = self.backend.complete(prompt).await?;

        let result = parse_response(&reply);
        if result.is_empty() {
            warn!(
                reply_chars = reply.len(),
                "Model reply contained no STEPS/CODE sections"
            );
        }

        info!(
            steps = result.steps.len(),
            code_blocks = result.code_blocks.len(),
            "Generation completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(result)
    }

    /// Name of the underlying backend, for display.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{MockBackend, MockResponse};
    use crate::generation::types::CodeLevel;

    const TEMPLATE_REPLY: &str = "STEPS:\n1. Set up playbook structure\n2. Define variables and handlers\n3. Implement tasks\nCODE:\nfilename: playbook.yml\n```yaml\n- hosts: all\n```";

    #[tokio::test]
    async fn test_generate_parses_backend_reply() {
        let backend = Arc::new(MockBackend::with_response(MockResponse::text(
            TEMPLATE_REPLY,
        )));
        let service = GenerationService::new(backend);

        let result = service
            .generate("install nginx", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.code_blocks.len(), 1);
        assert_eq!(result.code_blocks[0].file_name, "playbook.yml");
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_requirements() {
        let service = GenerationService::new(Arc::new(MockBackend::new()));

        let err = service
            .generate("   ", &GenerationOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyRequirements));
    }

    #[tokio::test]
    async fn test_generate_propagates_backend_failure() {
        let backend = Arc::new(MockBackend::with_response(MockResponse::error(
            BackendError::NetworkError {
                message: "connection refused".to_string(),
            },
        )));
        let service = GenerationService::new(backend);

        let err = service
            .generate("install nginx", &GenerationOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Backend(BackendError::NetworkError { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_tolerates_malformed_reply() {
        let backend = Arc::new(MockBackend::with_response(MockResponse::text(
            "I could not produce a playbook, sorry.",
        )));
        let service = GenerationService::new(backend);

        let result = service
            .generate("install nginx", &GenerationOptions::default())
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_reflects_options() {
        let backend = Arc::new(MockBackend::with_response(MockResponse::text(
            TEMPLATE_REPLY,
        )));
        let service = GenerationService::new(backend.clone());

        let options = GenerationOptions {
            code_level: CodeLevel::Advanced,
            multi_file: true,
        };
        service.generate("install nginx", &options).await.unwrap();

        let prompts = backend.recorded_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("comprehensive error handling"));
        assert!(prompts[0].contains("filename: vars/main.yml"));
    }

    #[test]
    fn test_help_message_for_timeout() {
        let err = ServiceError::Backend(BackendError::TimeoutError { seconds: 60 });
        let help = err.help_message();
        assert!(help.contains("--timeout 120"));
        assert!(help.contains("ansigen health"));
    }
}
