//! Think node: one AI message per step, errors passed through by kind.

mod init_logging;

use std::sync::Arc;
use std::time::Duration;

use nexus::{AgentError, ConversationState, Message, MockLlm, MockTurn, Node, ThinkNode};

#[tokio::test]
async fn tool_request_becomes_ai_message_with_calls() {
    let llm = MockLlm::scripted(vec![MockTurn::search("call_1", "gold price today")]);
    let node = ThinkNode::new(Arc::new(llm));

    let out = node
        .run(&ConversationState::seed("sys", "gold?"))
        .await
        .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].tool_calls().len(), 1);
    assert_eq!(out[0].tool_calls()[0].id, "call_1");
    assert_eq!(
        out[0].tool_calls()[0].arguments_value(),
        serde_json::json!({"query": "gold price today"})
    );
}

#[tokio::test]
async fn llm_sees_full_history() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("ok"));
    let node = ThinkNode::new(llm.clone());
    let state = ConversationState::seed("sys", "hi");

    node.run(&state).await.unwrap();

    let received = llm.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], vec![Message::system("sys"), Message::human("hi")]);
}

#[tokio::test]
async fn rate_limit_is_passed_through() {
    let node = ThinkNode::new(Arc::new(MockLlm::rate_limited("429 Too Many Requests")));

    let err = node
        .run(&ConversationState::seed("sys", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::RateLimited(_)));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn other_failures_are_not_recoverable() {
    let node = ThinkNode::new(Arc::new(MockLlm::failing("invalid api key")));

    let err = node
        .run(&ConversationState::seed("sys", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::ExecutionFailed(_)));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn slow_llm_times_out() {
    let llm = MockLlm::with_no_tool_calls("late").with_delay(Duration::from_millis(500));
    let node = ThinkNode::new(Arc::new(llm)).with_timeout(Some(Duration::from_millis(20)));

    let err = node
        .run(&ConversationState::seed("sys", "hi"))
        .await
        .unwrap_err();

    match err {
        AgentError::Timeout { step, after } => {
            assert_eq!(step, "think");
            assert_eq!(after, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}
