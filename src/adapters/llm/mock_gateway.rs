//! Mock LLM gateway for tests.
//!
//! Returns queued responses in order and records every request it receives,
//! so tests can assert on prompts without touching the network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::{CompletionRequest, CompletionResponse, LlmError, LlmGateway};

/// Scripted gateway: pops one queued result per `complete` call.
#[derive(Default)]
pub struct MockLlmGateway {
    responses: Mutex<VecDeque<Result<String, MockFailure>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

#[derive(Debug, Clone)]
enum MockFailure {
    Unavailable,
    Timeout,
}

impl MockLlmGateway {
    /// Creates an empty mock. Calls fail with `Unavailable` when the queue
    /// runs dry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn push_response(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
    }

    /// Queues an `Unavailable` failure.
    pub fn push_unavailable(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(MockFailure::Unavailable));
    }

    /// Queues a `Timeout` failure.
    pub fn push_timeout(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(MockFailure::Timeout));
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Copies of every request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for MockLlmGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(CompletionResponse { content, model }),
            Some(Err(MockFailure::Unavailable)) => Err(LlmError::unavailable("mock outage")),
            Some(Err(MockFailure::Timeout)) => Err(LlmError::Timeout { timeout_secs: 60 }),
            None => Err(LlmError::unavailable("mock queue empty")),
        }
    }
}
