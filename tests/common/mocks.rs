//! Mock implementations for testing.
//!
//! Scripted memory and completion clients that can be shared across test
//! files. Both record call counts (and the prompts/contents they were
//! given) so tests can assert which pipeline stages ran.

use async_trait::async_trait;
use recall_chat::llm::{CompletionClient, CompletionError};
use recall_chat::memory::{MemoryError, MemoryService};
use recall_chat::types::{ChatMessage, MemoryQuery, MemoryRecord};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock memory service with scripted per-call write outcomes and a single
/// scripted recall outcome.
///
/// Write outcomes are consumed in call order; once the script is
/// exhausted, writes succeed. An unscripted recall returns no records.
pub struct MockMemoryService {
    write_script: Mutex<VecDeque<Result<(), MemoryError>>>,
    recall_script: Mutex<Option<Result<Vec<MemoryRecord>, MemoryError>>>,
    pub write_calls: AtomicUsize,
    pub recall_calls: AtomicUsize,
    /// Contents successfully handed to `write`, in call order.
    pub written: Mutex<Vec<String>>,
}

impl MockMemoryService {
    /// Writes succeed, recall returns no records.
    pub fn new() -> Self {
        Self {
            write_script: Mutex::new(VecDeque::new()),
            recall_script: Mutex::new(None),
            write_calls: AtomicUsize::new(0),
            recall_calls: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Recall returns the given records.
    pub fn with_records(records: Vec<MemoryRecord>) -> Self {
        let mock = Self::new();
        *mock.recall_script.lock().unwrap() = Some(Ok(records));
        mock
    }

    /// Recall fails with the given error.
    pub fn with_recall_error(error: MemoryError) -> Self {
        let mock = Self::new();
        *mock.recall_script.lock().unwrap() = Some(Err(error));
        mock
    }

    /// The first write (the user input persist) fails.
    pub fn failing_write() -> Self {
        let mock = Self::new();
        mock.write_script
            .lock()
            .unwrap()
            .push_back(Err(MemoryError::Request("scripted write failure".into())));
        mock
    }

    /// The second write (the reply persist) fails; the first succeeds.
    pub fn failing_reply_write() -> Self {
        let mock = Self::new();
        let mut script = mock.write_script.lock().unwrap();
        script.push_back(Ok(()));
        script.push_back(Err(MemoryError::Request(
            "scripted reply write failure".into(),
        )));
        drop(script);
        mock
    }
}

impl Default for MockMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryService for MockMemoryService {
    async fn write(
        &self,
        _user_id: &str,
        _project_id: &str,
        content: &str,
    ) -> Result<(), MemoryError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .write_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        if outcome.is_ok() {
            self.written.lock().unwrap().push(content.to_string());
        }
        outcome
    }

    async fn recall(&self, _query: &MemoryQuery) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.recall_calls.fetch_add(1, Ordering::SeqCst);
        self.recall_script
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(Vec::new()))
    }
}

/// Mock completion client with a fixed response (or failure) that records
/// every prompt it receives.
pub struct MockCompletionClient {
    response: String,
    should_fail: bool,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The single recorded prompt, for tests that run exactly one turn.
    pub fn only_prompt(&self) -> Vec<ChatMessage> {
        let prompts = self.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "expected exactly one completion call");
        prompts[0].clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(messages.to_vec());
        if self.should_fail {
            return Err(CompletionError::Request("scripted failure".into()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Build a memory record with just content, the shape recall tests need.
pub fn record(content: &str) -> MemoryRecord {
    MemoryRecord {
        content: content.to_string(),
        created_at: None,
    }
}
