//! Core value types for playbook generation
//!
//! These are plain serde records: the parser produces them, the session edits
//! them, the CLI renders them. None of them carry behavior beyond constructors.

use serde::{Deserialize, Serialize};

/// Language recorded on every generated code block.
///
/// The output domain is Ansible, so every file body is YAML regardless of any
/// language tag the model put on its code fences.
pub const CODE_LANGUAGE: &str = "yaml";

/// One ordered, user-editable implementation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Opaque identifier, unique within one step list.
    pub id: String,

    /// Human-readable instruction text.
    pub description: String,

    /// Reserved. Always false at creation; nothing sets it true yet.
    pub completed: bool,
}

impl Step {
    /// Creates a step with the given id and description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// One named generated file body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Target file name (e.g. "playbook.yml", "vars/main.yml").
    /// Empty means a single unnamed file.
    pub file_name: String,

    /// Always [`CODE_LANGUAGE`] for this domain.
    pub language: String,

    /// Raw file body with fences and the header line stripped.
    pub code: String,
}

impl CodeBlock {
    pub fn new(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            language: CODE_LANGUAGE.to_string(),
            code: code.into(),
        }
    }
}

/// How much directive detail is injected into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLevel {
    #[default]
    Basic,
    Advanced,
}

/// Options shaping one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Complexity directive for the prompt.
    pub code_level: CodeLevel,

    /// Ask the model to split output into several named files.
    pub multi_file: bool,
}

/// Parsed output of one generation call.
///
/// The two lists are independent projections of the same model reply; there
/// are no cross-references between them. Step order and block order follow the
/// source text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub steps: Vec<Step>,
    pub code_blocks: Vec<CodeBlock>,
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.code_blocks.is_empty()
    }
}
