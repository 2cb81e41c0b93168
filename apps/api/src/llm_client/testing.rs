//! In-memory `TextGenerator` for tests. Counts calls and records requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationRequest, LlmError, TextGenerator};

pub enum StubReply {
    Text(String),
    ApiError { status: u16, message: String },
    Empty,
}

pub struct StubGenerator {
    reply: StubReply,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, GenerationRequest)>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(StubReply::ApiError {
            status,
            message: message.to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The (api_key, request) pair of the most recent call.
    pub fn last_call(&self) -> Option<(String, GenerationRequest)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::ApiError { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            StubReply::Empty => Err(LlmError::EmptyContent),
        }
    }
}
