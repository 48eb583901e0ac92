//! Act node: executes the first pending search and always answers it with a tool message.

mod init_logging;

use std::sync::Arc;
use std::time::Duration;

use nexus::{
    ActNode, ConversationState, Message, MockSearchTool, Node, ToolCall, SEARCH_ERROR_PREFIX,
};
use serde_json::{Map, Value};

fn state_with(calls: Vec<ToolCall>) -> ConversationState {
    let mut state = ConversationState::seed("sys", "gold price?");
    state.append(vec![Message::ai_with_tool_calls("", calls)]);
    state
}

#[tokio::test]
async fn result_copies_call_id_and_name() {
    let tool = MockSearchTool::new("none").with_answer("gold price today", "Gold: $2400/oz");
    let node = ActNode::new(Arc::new(tool));
    let call = ToolCall::search("call_42", "gold price today");

    let out = node.run(&state_with(vec![call.clone()])).await.unwrap();

    assert_eq!(out, vec![Message::tool_result(&call, "Gold: $2400/oz")]);
    match &out[0] {
        Message::Tool {
            tool_call_id,
            tool_name,
            ..
        } => {
            assert_eq!(tool_call_id, "call_42");
            assert_eq!(tool_name, "search");
        }
        other => panic!("expected tool message, got {:?}", other),
    }
}

#[tokio::test]
async fn failure_becomes_error_text_with_ids() {
    let node = ActNode::new(Arc::new(MockSearchTool::failing("connection reset")));
    let call = ToolCall::search("call_7", "anything");

    let out = node.run(&state_with(vec![call])).await.unwrap();

    assert_eq!(out.len(), 1);
    let content = out[0].content();
    assert!(content.starts_with(SEARCH_ERROR_PREFIX), "{}", content);
    assert!(content.contains("connection reset"), "{}", content);
    assert!(matches!(&out[0], Message::Tool { tool_call_id, .. } if tool_call_id == "call_7"));
}

#[tokio::test]
async fn no_pending_call_is_a_no_op() {
    let tool = Arc::new(MockSearchTool::new("r"));
    let node = ActNode::new(tool.clone());
    let mut state = ConversationState::seed("sys", "hi");
    state.append(vec![Message::ai("nothing to search")]);

    let out = node.run(&state).await.unwrap();

    assert!(out.is_empty());
    assert_eq!(tool.call_count(), 0);
}

#[tokio::test]
async fn only_the_first_call_runs() {
    let tool = Arc::new(
        MockSearchTool::new("default")
            .with_answer("first", "one")
            .with_answer("second", "two"),
    );
    let node = ActNode::new(tool.clone());
    let state = state_with(vec![
        ToolCall::search("a", "first"),
        ToolCall::search("b", "second"),
    ]);

    let out = node.run(&state).await.unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].content(), "one");
    assert_eq!(tool.call_count(), 1);
}

#[tokio::test]
async fn same_call_twice_gives_identical_results() {
    let node = ActNode::new(Arc::new(MockSearchTool::new("stable result")));
    let state = state_with(vec![ToolCall::search("c", "q")]);

    let first = node.run(&state).await.unwrap();
    let second = node.run(&state).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_tool_name_is_reported_as_text() {
    let tool = Arc::new(MockSearchTool::new("r"));
    let node = ActNode::new(tool.clone());
    let mut args = Map::new();
    args.insert("url".into(), Value::String("https://example.com".into()));
    let call = ToolCall::new("call_x", "fetch_page", args);

    let out = node.run(&state_with(vec![call])).await.unwrap();

    assert_eq!(out.len(), 1);
    assert!(out[0].content().starts_with(SEARCH_ERROR_PREFIX));
    assert!(out[0].content().contains("fetch_page"));
    assert_eq!(tool.call_count(), 0);
}

#[tokio::test]
async fn missing_query_is_reported_as_text() {
    let node = ActNode::new(Arc::new(MockSearchTool::new("r")));
    let call = ToolCall::new("call_m", "search", Map::new());

    let out = node.run(&state_with(vec![call])).await.unwrap();

    assert!(out[0].content().contains("missing query"), "{}", out[0].content());
}

#[tokio::test]
async fn slow_tool_times_out_into_error_text() {
    let tool = MockSearchTool::new("late").with_delay(Duration::from_millis(500));
    let node = ActNode::new(Arc::new(tool)).with_timeout(Some(Duration::from_millis(20)));

    let out = node
        .run(&state_with(vec![ToolCall::search("c", "q")]))
        .await
        .unwrap();

    assert!(out[0].content().starts_with(SEARCH_ERROR_PREFIX));
    assert!(out[0].content().contains("timed out"), "{}", out[0].content());
}
