//! Parser for the model's STEPS/CODE reply
//!
//! The generation prompt asks the model to answer with a `STEPS:` section (a
//! numbered list) followed by a `CODE:` section (one or more
//! `filename:`-delimited fenced file bodies). The model is free-form, so
//! nothing here is an error condition: missing markers degrade to empty lists
//! and the caller decides what an empty result means.
//!
//! The parse runs in two stages: a section locator that carves the raw text
//! into the steps substring and the code substring, then per-section splitters
//! that turn lines into [`Step`]s and `filename:` segments into [`CodeBlock`]s.

use crate::generation::types::{CodeBlock, GenerationResult, Step};
use regex::Regex;
use tracing::debug;

const STEPS_MARKER: &str = "STEPS:";
const CODE_MARKER: &str = "CODE:";
const FILENAME_MARKER: &str = "filename:";

/// Parses one raw model reply into steps and code blocks.
///
/// Pure function of its input: no hidden state, no randomness. Step ids are
/// synthesized sequentially (`"1"`, `"2"`, ...) and do not follow whatever
/// numbering the model used.
pub fn parse_response(text: &str) -> GenerationResult {
    let steps = steps_section(text).map(parse_steps).unwrap_or_default();
    let code_blocks = code_section(text).map(parse_code_blocks).unwrap_or_default();

    debug!(
        steps = steps.len(),
        code_blocks = code_blocks.len(),
        "Parsed generation response ({} chars)",
        text.len()
    );

    GenerationResult { steps, code_blocks }
}

/// Returns the substring between the first `STEPS:` marker and the first
/// `CODE:` marker that follows it. Both markers must be present.
fn steps_section(text: &str) -> Option<&str> {
    let start = text.find(STEPS_MARKER)? + STEPS_MARKER.len();
    let rest = &text[start..];
    let end = rest.find(CODE_MARKER)?;
    Some(&rest[..end])
}

/// Returns everything after the first `CODE:` marker in the text.
fn code_section(text: &str) -> Option<&str> {
    let start = text.find(CODE_MARKER)? + CODE_MARKER.len();
    Some(&text[start..])
}

/// Splits the steps section into records: one per non-blank line, numbering
/// prefix stripped, ids assigned 1-based after blank-line filtering.
fn parse_steps(section: &str) -> Vec<Step> {
    let numbering = Regex::new(r"^\d+\.\s*").unwrap();

    section
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            let description = numbering.replace(line.trim(), "").trim().to_string();
            Step::new((index + 1).to_string(), description)
        })
        .collect()
}

/// Splits the code section on `filename:` markers into named file bodies.
///
/// The first line of each segment (trimmed) is the file name; the rest is the
/// body with one opening and one closing fence stripped. A segment whose
/// file-name line is blank still produces a block with an empty name; segments
/// that are blank in their entirety (notably the text before the first
/// marker) are skipped.
fn parse_code_blocks(section: &str) -> Vec<CodeBlock> {
    section
        .trim()
        .split(FILENAME_MARKER)
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            let mut parts = segment.splitn(2, '\n');
            let file_name = parts.next().unwrap_or("").trim();
            let body = parts.next().unwrap_or("");
            CodeBlock::new(file_name, strip_fences(body))
        })
        .collect()
}

/// Removes one leading fenced-code opening marker (backticks plus an optional
/// language tag) and one trailing closing marker, then trims.
///
/// Segments in multi-file replies end with blank lines before the next
/// `filename:` marker, so trailing whitespace is dropped before looking for
/// the closing fence.
fn strip_fences(body: &str) -> String {
    let opening = Regex::new(r"^```\w*\n").unwrap();

    let body = opening.replace(body, "");
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim().to_string()
}
