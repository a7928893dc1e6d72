//! Deterministic `ModelClient` for tests.
//!
//! Replies are scripted up front and consumed in order. Every request is
//! recorded so tests can assert how many calls were made and what was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::llm_client::{LlmError, ModelClient, ModelRequest};

enum Reply {
    Text(String),
    Fail { status: u16, message: String },
}

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

#[derive(Default)]
pub struct StubModelClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ModelRequest>>,
    gate: Option<Arc<Gate>>,
}

impl StubModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `release()` before replying.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Gate::default())),
            ..Self::default()
        }
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Reply::Text(text.into()));
        self
    }

    /// Replies with the JSON object `{ field: value }`.
    pub fn reply_field(self, field: &str, value: &str) -> Self {
        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), serde_json::Value::String(value.to_string()));
        self.reply(serde_json::Value::Object(body).to_string())
    }

    pub fn fail(self, status: u16, message: impl Into<String>) -> Self {
        self.push(Reply::Fail {
            status,
            message: message.into(),
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Resolves once a gated call has started.
    pub async fn wait_until_entered(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notified().await;
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }

    fn push(&self, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn complete(&self, request: ModelRequest) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let reply = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail { status, message }) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
