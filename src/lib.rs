//! ansigen - AI-powered Ansible playbook generator with step review
//!
//! This library turns a free-text requirement description into an Ansible
//! playbook using Large Language Models (LLMs). The model first proposes a
//! short list of implementation steps; the user can review, edit and reorder
//! them before the playbook itself is generated.
//!
//! # Core Concepts
//!
//! - **LLM Backends**: Pluggable AI providers (Ollama, OpenAI, Claude,
//!   Gemini, ...) behind one completion trait
//! - **Response Parser**: turns the model's semi-structured `STEPS:` /
//!   `CODE:` reply into step records and named file bodies, degrading to
//!   empty lists on malformed input
//! - **Session**: explicit application state with named transitions for
//!   editing the step list before the final generation call
//!
//! # Example Usage
//!
//! ```ignore
//! use ansigen::{AnsigenConfig, GenerationOptions, GenerationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnsigenConfig::default();
//! let service = GenerationService::new(config.create_backend());
//!
//! let result = service
//!     .generate("install nginx", &GenerationOptions::default())
//!     .await?;
//!
//! for step in &result.steps {
//!     println!("{}. {}", step.id, step.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`ai`]: LLM backend implementations and abstractions
//! - [`generation`]: prompt construction, response parsing, orchestration
//! - [`session`]: editable step-list state and transitions
//! - [`cli`]: argument parsing, handlers, rendering, interactive review

pub mod ai;
pub mod cli;
pub mod config;
pub mod generation;
pub mod session;
pub mod util;

// Re-export key types for convenient access
pub use ai::backend::{BackendError, LLMBackend};
pub use ai::genai_backend::{GenAIBackend, Provider};
pub use config::{AnsigenConfig, ConfigError};
pub use generation::response::parse_response;
pub use generation::service::{GenerationService, ServiceError};
pub use generation::types::{CodeBlock, CodeLevel, GenerationOptions, GenerationResult, Step};
pub use session::{Session, SessionError};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
