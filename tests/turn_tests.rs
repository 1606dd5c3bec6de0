//! Turn pipeline behavior tests.
//!
//! These exercise the orchestrator's fixed call order and its graded
//! failure policy against scripted mock clients: which stages run, which
//! failures abort the turn, and which degrade into warnings.

mod common;

use common::mocks::{MockCompletionClient, MockMemoryService, record};
use recall_chat::memory::MemoryError;
use recall_chat::orchestrator::{Orchestrator, TurnError, TurnWarning};
use recall_chat::types::MessageRole;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn orchestrator(
    memory: MockMemoryService,
    completion: MockCompletionClient,
) -> (Orchestrator, Arc<MockMemoryService>, Arc<MockCompletionClient>) {
    let memory = Arc::new(memory);
    let completion = Arc::new(completion);
    let orch = Orchestrator::new(memory.clone(), completion.clone(), Some(10));
    (orch, memory, completion)
}

// ============= Fatal Paths =============

#[tokio::test]
async fn input_write_failure_aborts_before_generation() {
    let (orch, memory, completion) = orchestrator(
        MockMemoryService::failing_write(),
        MockCompletionClient::new("never seen"),
    );

    let err = orch.run_turn("hello", "u1", "p1").await.unwrap_err();
    assert!(matches!(err, TurnError::WriteFailed(_)));

    // The pipeline must short-circuit: no recall, no completion.
    assert_eq!(memory.recall_calls.load(Ordering::SeqCst), 0);
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn generation_failure_aborts_without_reply_persist() {
    let (orch, memory, completion) = orchestrator(
        MockMemoryService::with_records(vec![record("User likes tea")]),
        MockCompletionClient::failing(),
    );

    let err = orch.run_turn("hello", "u1", "p1").await.unwrap_err();
    assert!(matches!(err, TurnError::GenerationFailed(_)));

    // Only the input write ran; the reply write was never attempted.
    assert_eq!(memory.write_calls.load(Ordering::SeqCst), 1);
    assert_eq!(completion.call_count(), 1);
}

#[tokio::test]
async fn generation_failure_is_fatal_even_when_recall_failed() {
    let (orch, _memory, _completion) = orchestrator(
        MockMemoryService::with_recall_error(MemoryError::Unavailable("rate limited".into())),
        MockCompletionClient::failing(),
    );

    let err = orch.run_turn("hello", "u1", "p1").await.unwrap_err();
    assert!(matches!(err, TurnError::GenerationFailed(_)));
}

// ============= Recall Degradation =============

#[tokio::test]
async fn recall_request_error_degrades_to_empty_context() {
    let (orch, _memory, completion) = orchestrator(
        MockMemoryService::with_recall_error(MemoryError::Request("boom".into())),
        MockCompletionClient::new("reply"),
    );

    let result = orch.run_turn("hello", "u1", "p1").await.unwrap();
    assert_eq!(result.reply, "reply");
    assert_eq!(result.recalled_summary, "");
    assert!(
        result
            .warnings
            .iter()
            .any(|w| matches!(w, TurnWarning::RecallDegraded(_)))
    );

    // Prompt carries no system message.
    let prompt = completion.only_prompt();
    assert_eq!(prompt.len(), 1);
    assert_eq!(prompt[0].role, MessageRole::User);
}

#[tokio::test]
async fn recall_unavailable_degrades_to_empty_context() {
    let (orch, _memory, completion) = orchestrator(
        MockMemoryService::with_recall_error(MemoryError::Unavailable("429".into())),
        MockCompletionClient::new("reply"),
    );

    let result = orch.run_turn("hello", "u1", "p1").await.unwrap();
    assert_eq!(result.reply, "reply");
    assert_eq!(completion.call_count(), 1);
    assert_eq!(completion.only_prompt().len(), 1);
}

#[tokio::test]
async fn empty_recall_result_is_not_a_warning() {
    let (orch, _memory, completion) = orchestrator(
        MockMemoryService::new(),
        MockCompletionClient::new("reply"),
    );

    let result = orch.run_turn("hello", "u1", "p1").await.unwrap();
    assert!(result.warnings.is_empty());
    assert_eq!(completion.only_prompt().len(), 1);
}

// ============= Prompt Composition =============

#[tokio::test]
async fn only_first_recalled_record_is_used() {
    let (orch, _memory, completion) = orchestrator(
        MockMemoryService::with_records(vec![record("A"), record("B")]),
        MockCompletionClient::new("reply"),
    );

    orch.run_turn("hello", "u1", "p1").await.unwrap();

    let prompt = completion.only_prompt();
    assert_eq!(prompt.len(), 2);
    assert_eq!(prompt[0].role, MessageRole::System);
    assert_eq!(prompt[0].content, "Recalled Summary: A");
}

// ============= Reply Persistence =============

#[tokio::test]
async fn reply_write_failure_still_returns_reply_with_warning() {
    let (orch, memory, _completion) = orchestrator(
        MockMemoryService::failing_reply_write(),
        MockCompletionClient::new("the reply"),
    );

    let result = orch.run_turn("hello", "u1", "p1").await.unwrap();
    assert_eq!(result.reply, "the reply");
    assert!(
        result
            .warnings
            .iter()
            .any(|w| matches!(w, TurnWarning::ReplyWriteFailed(_)))
    );
    assert_eq!(memory.write_calls.load(Ordering::SeqCst), 2);
}

// ============= End-to-End Scenarios =============

#[tokio::test]
async fn turn_without_memory() {
    let (orch, memory, completion) = orchestrator(
        MockMemoryService::new(),
        MockCompletionClient::new("Noted!"),
    );

    let result = orch.run_turn("I like tea", "u1", "p1").await.unwrap();
    assert_eq!(result.reply, "Noted!");
    assert!(result.warnings.is_empty());

    let prompt = completion.only_prompt();
    assert_eq!(prompt.len(), 1);
    assert_eq!(prompt[0].role, MessageRole::User);
    assert_eq!(prompt[0].content, "I like tea");

    // Both the input and the reply were persisted, in order.
    let written = memory.written.lock().unwrap();
    assert_eq!(written.as_slice(), ["I like tea", "Noted!"]);
}

#[tokio::test]
async fn turn_with_recalled_memory() {
    let (orch, _memory, completion) = orchestrator(
        MockMemoryService::with_records(vec![record("User likes tea")]),
        MockCompletionClient::new("You like tea."),
    );

    let result = orch.run_turn("What do I like?", "u1", "p1").await.unwrap();
    assert_eq!(result.reply, "You like tea.");
    assert_eq!(result.recalled_summary, "User likes tea");

    let prompt = completion.only_prompt();
    assert_eq!(prompt.len(), 2);
    assert_eq!(prompt[0].role, MessageRole::System);
    assert_eq!(prompt[0].content, "Recalled Summary: User likes tea");
    assert_eq!(prompt[1].role, MessageRole::User);
    assert_eq!(prompt[1].content, "What do I like?");
}
