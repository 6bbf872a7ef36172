//! Scripted backend for tests
//!
//! Queues canned completions or errors and replays them in order. Public so
//! integration tests can drive the generation service without a provider.

use crate::ai::backend::{BackendError, LLMBackend};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct MockBackend {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    name: String,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub content: String,
    pub error: Option<BackendError>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
        }
    }

    pub fn error(error: BackendError) -> Self {
        Self {
            content: String::new(),
            error: Some(error),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            name: "Mock".to_string(),
        }
    }

    pub fn with_response(response: MockResponse) -> Self {
        let backend = Self::new();
        backend.add_response(response);
        backend
    }

    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap();
        for response in responses {
            queue.push_back(response);
        }
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMBackend for MockBackend {
    async fn complete(&self, prompt: String) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt);

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BackendError::Other {
                message: "MockBackend has no responses queued".to_string(),
            })?;

        match response.error {
            Some(error) => Err(error),
            None => Ok(response.content),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
