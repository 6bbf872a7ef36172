//! Editable generation session state
//!
//! One explicit state record plus named transitions, replacing the original
//! scatter of per-field mutable view state. The session owns the requirement
//! text, the request options, the step list under review and the generated
//! code blocks.
//!
//! Concurrency model: at most one generation request is outstanding.
//! [`Session::begin_request`] flips the busy flag and refuses a second
//! request; there is no queue and no cancellation. Step edits operate on the
//! previous result, so they cannot race with an in-flight call.

use crate::generation::types::{CodeBlock, CodeLevel, GenerationOptions, GenerationResult, Step};
use chrono::Utc;
use thiserror::Error;

/// Fixed user-facing messages for the two generation actions.
pub const STEPS_FAILURE_MESSAGE: &str = "Failed to generate validation steps. Please try again.";
pub const CODE_FAILURE_MESSAGE: &str = "Failed to generate code. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A generation request is already in flight
    #[error("A generation request is already in flight")]
    Busy,

    /// Step id not present in the current list
    #[error("No step with id {0}")]
    UnknownStep(String),

    /// Reorder position outside the current list
    #[error("Step position {0} is out of range")]
    PositionOutOfRange(usize),
}

/// Mutable state of one interactive generation session.
#[derive(Debug, Default)]
pub struct Session {
    requirements: String,
    options: GenerationOptions,
    steps: Vec<Step>,
    code_blocks: Vec<CodeBlock>,
    busy: bool,
    error: Option<String>,
}

impl Session {
    pub fn new(requirements: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            requirements: requirements.into(),
            options,
            ..Default::default()
        }
    }

    pub fn requirements(&self) -> &str {
        &self.requirements
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // Request option transitions.

    pub fn set_requirements(&mut self, requirements: impl Into<String>) {
        self.requirements = requirements.into();
    }

    pub fn set_code_level(&mut self, level: CodeLevel) {
        self.options.code_level = level;
    }

    pub fn set_multi_file(&mut self, multi_file: bool) {
        self.options.multi_file = multi_file;
    }

    // Request lifecycle transitions.

    /// Marks a request as in flight. Fails while another one is outstanding.
    pub fn begin_request(&mut self) -> Result<(), SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.busy = true;
        self.error = None;
        Ok(())
    }

    /// Records a failed request: busy cleared so the user may retry manually,
    /// the fixed generic message retained for display.
    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.error = Some(message.into());
    }

    /// Installs steps for review, discarding any previous result.
    pub fn apply_validation(&mut self, steps: Vec<Step>) {
        self.busy = false;
        self.error = None;
        self.steps = steps;
        self.code_blocks.clear();
    }

    /// Installs a full generation result wholesale.
    pub fn apply_generation(&mut self, result: GenerationResult) {
        self.busy = false;
        self.error = None;
        self.steps = result.steps;
        self.code_blocks = result.code_blocks;
    }

    /// Confirms the reviewed plan and hands back the requirement text for the
    /// follow-up call. The edited steps are deliberately not folded into the
    /// prompt; the review exists so the user can vet the plan before paying
    /// for the full generation.
    pub fn confirm(&self) -> &str {
        &self.requirements
    }

    // Step editing transitions.

    /// Appends a user-authored step. The id is derived from the current time,
    /// which cannot collide with the parser's small sequential ids.
    pub fn add_step(&mut self, description: impl Into<String>) -> &Step {
        let id = Utc::now().timestamp_millis().to_string();
        self.steps.push(Step::new(id, description));
        self.steps.last().expect("step was just pushed")
    }

    /// Replaces the description of the step with the given id.
    pub fn update_step(&mut self, id: &str, description: impl Into<String>) -> Result<(), SessionError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SessionError::UnknownStep(id.to_string()))?;
        step.description = description.into();
        Ok(())
    }

    /// Deletes the step with the given id.
    pub fn remove_step(&mut self, id: &str) -> Result<(), SessionError> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SessionError::UnknownStep(id.to_string()))?;
        self.steps.remove(index);
        Ok(())
    }

    /// Moves the step at `from` to position `to`, shifting the rest.
    /// Positions are zero-based indexes into the displayed order.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        if from >= self.steps.len() {
            return Err(SessionError::PositionOutOfRange(from));
        }
        if to >= self.steps.len() {
            return Err(SessionError::PositionOutOfRange(to));
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_steps(descriptions: &[&str]) -> Session {
        let mut session = Session::new("install nginx", GenerationOptions::default());
        let steps = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| Step::new((i + 1).to_string(), *d))
            .collect();
        session.apply_validation(steps);
        session
    }

    #[test]
    fn test_begin_request_refuses_second_call() {
        let mut session = Session::default();
        session.begin_request().unwrap();

        assert_eq!(session.begin_request(), Err(SessionError::Busy));
        assert!(session.is_busy());
    }

    #[test]
    fn test_fail_request_clears_busy_and_records_message() {
        let mut session = Session::default();
        session.begin_request().unwrap();
        session.fail_request(STEPS_FAILURE_MESSAGE);

        assert!(!session.is_busy());
        assert_eq!(session.last_error(), Some(STEPS_FAILURE_MESSAGE));
        assert!(session.begin_request().is_ok());
    }

    #[test]
    fn test_apply_generation_replaces_everything() {
        let mut session = session_with_steps(&["old"]);
        session.begin_request().unwrap();

        session.apply_generation(GenerationResult {
            steps: vec![Step::new("1", "new")],
            code_blocks: vec![CodeBlock::new("playbook.yml", "foo: bar")],
        });

        assert!(!session.is_busy());
        assert_eq!(session.steps().len(), 1);
        assert_eq!(session.steps()[0].description, "new");
        assert_eq!(session.code_blocks().len(), 1);
    }

    #[test]
    fn test_apply_validation_discards_previous_code() {
        let mut session = Session::default();
        session.apply_generation(GenerationResult {
            steps: vec![],
            code_blocks: vec![CodeBlock::new("playbook.yml", "foo: bar")],
        });

        session.apply_validation(vec![Step::new("1", "Do X")]);

        assert_eq!(session.steps().len(), 1);
        assert!(session.code_blocks().is_empty());
    }

    #[test]
    fn test_add_step_uses_time_derived_id() {
        let mut session = session_with_steps(&["a"]);
        let id = session.add_step("added by user").id.clone();

        // Millisecond timestamps are far larger than the parser's sequential
        // ids, so they cannot collide.
        assert!(id.parse::<i64>().unwrap() > 1_000_000_000_000);
        assert_eq!(session.steps().len(), 2);
        assert!(!session.steps()[1].completed);
    }

    #[test]
    fn test_update_step_by_id() {
        let mut session = session_with_steps(&["a", "b"]);

        session.update_step("2", "edited").unwrap();

        assert_eq!(session.steps()[1].description, "edited");
        assert!(matches!(
            session.update_step("99", "nope"),
            Err(SessionError::UnknownStep(_))
        ));
    }

    #[test]
    fn test_remove_step_preserves_order_of_rest() {
        let mut session = session_with_steps(&["a", "b", "c"]);

        session.remove_step("2").unwrap();

        let descriptions: Vec<_> = session.steps().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(descriptions, vec!["a", "c"]);
    }

    #[test]
    fn test_move_step_reorders() {
        let mut session = session_with_steps(&["a", "b", "c"]);

        session.move_step(2, 0).unwrap();

        let descriptions: Vec<_> = session.steps().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(descriptions, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_step_rejects_out_of_range() {
        let mut session = session_with_steps(&["a", "b"]);

        assert_eq!(
            session.move_step(5, 0),
            Err(SessionError::PositionOutOfRange(5))
        );
        assert_eq!(
            session.move_step(0, 5),
            Err(SessionError::PositionOutOfRange(5))
        );
    }

    #[test]
    fn test_confirm_returns_original_requirements() {
        let mut session = session_with_steps(&["a"]);
        session.update_step("1", "heavily edited").unwrap();

        // Edits are visible in the step list but the follow-up request is
        // built from the unchanged requirement text.
        assert_eq!(session.confirm(), "install nginx");
    }
}
