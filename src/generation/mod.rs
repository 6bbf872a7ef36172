//! Playbook generation: prompt construction, response parsing, orchestration

pub mod prompt;
pub mod response;
pub mod service;
pub mod types;

pub use response::parse_response;
pub use service::{GenerationService, ServiceError};
pub use types::{CodeBlock, CodeLevel, GenerationOptions, GenerationResult, Step};
