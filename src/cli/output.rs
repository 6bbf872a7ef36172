//! Result rendering and file output
//!
//! Generated results can be rendered as human-readable text, JSON or YAML, and
//! the code blocks can be written out as real files (multi-file replies carry
//! nested paths such as `vars/main.yml`).

use crate::generation::types::{CodeBlock, GenerationResult, Step};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Fallback name for a block the model left unnamed.
const DEFAULT_FILE_NAME: &str = "playbook.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Renders a full generation result in the requested format.
pub fn render_result(result: &GenerationResult, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
        OutputFormat::Human => Ok(render_human(result)),
    }
}

/// Renders just a step list in the requested format.
pub fn render_steps(steps: &[Step], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(steps)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(steps)?),
        OutputFormat::Human => Ok(render_steps_human(steps)),
    }
}

fn render_steps_human(steps: &[Step]) -> String {
    if steps.is_empty() {
        return "No steps generated.\n".to_string();
    }

    let mut out = String::from("Implementation steps:\n");
    for (index, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, step.description);
    }
    out
}

fn render_human(result: &GenerationResult) -> String {
    let mut out = render_steps_human(&result.steps);

    for block in &result.code_blocks {
        let name = display_name(block);
        let _ = write!(out, "\n--- {} ---\n{}\n", name, block.code);
    }

    if result.code_blocks.is_empty() {
        out.push_str("\nNo code generated.\n");
    }

    out
}

fn display_name(block: &CodeBlock) -> &str {
    if block.file_name.is_empty() {
        DEFAULT_FILE_NAME
    } else {
        &block.file_name
    }
}

/// Writes each code block under `dir`, creating intermediate directories.
///
/// Returns the paths written. Blocks whose names try to escape the output
/// directory are skipped with a warning rather than failing the whole write.
pub fn write_code_blocks(blocks: &[CodeBlock], dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(blocks.len());
    for block in blocks {
        let name = display_name(block);
        let relative = Path::new(name);

        if !is_safe_relative(relative) {
            warn!("Skipping code block with unsafe file name: {:?}", name);
            continue;
        }

        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut body = block.code.clone();
        if !body.ends_with('\n') {
            body.push('\n');
        }
        fs::write(&path, body)?;

        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn is_safe_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
