//! LLM backend implementations and abstractions

pub mod backend;
pub mod genai_backend;
pub mod mock;

pub use backend::{BackendError, LLMBackend};
pub use genai_backend::{GenAIBackend, Provider};
