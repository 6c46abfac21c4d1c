//! Integration tests for the conversation loop
//!
//! Drives `Agent::run` against a scripted model and real tools.

mod common;

use common::{call, text, MockProvider};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tool_agent::agent::{Agent, AgentState, RunStatus, MAX_ITERATIONS_MESSAGE};
use tool_agent::invoker::{required_i64, ReturnConvention, Tool, ToolRegistry};
use tool_agent::observability::SessionLog;
use tool_agent::provider::{GenerateResponse, Message, ToolCall, ToolChoice};

fn calculator() -> ToolRegistry {
    ToolRegistry::from_tools([
        Tool::new("add", |args| Ok(json!(required_i64(args, "a")? + required_i64(args, "b")?)))
            .doc("Add two integers.")
            .param::<i64>("a")
            .param::<i64>("b"),
        Tool::new("reset", |_| Ok(Value::Null)).doc("Reset the calculator."),
        Tool::new("explode", |_| Err(anyhow::anyhow!("calculator on fire")))
            .param::<String>("why"),
        Tool::new("echo", |args| Ok(args.get("text").cloned().unwrap_or(Value::Null)))
            .param::<String>("text")
            .returns(ReturnConvention::PlainStringIsData),
    ])
    .unwrap()
}

fn agent(provider: &MockProvider, max_iterations: usize) -> Agent {
    Agent::new("You are a calculator.", provider.shared())
        .with_max_iterations(max_iterations)
        .with_tools(calculator())
}

fn tool_message(result: &[Message], index: usize) -> (&str, &str, &str) {
    match &result[index] {
        Message::Tool {
            tool_call_id,
            name,
            content,
        } => (tool_call_id.as_str(), name.as_str(), content.as_str()),
        other => panic!("expected tool message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_tool_call_then_completion() {
    let provider = MockProvider::scripted(vec![
        call("call_1", "add", r#"{"a": 2, "b": 3}"#),
        text("The sum is 5. Task complete."),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("What is 2 + 3?").await;

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.result.as_deref(), Some("The sum is 5. Task complete."));
    assert_eq!(result.final_message, result.result);
    assert!(result.warning.is_none());
    assert!(result.error.is_none());

    let transcript = &result.transcript;
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript[0], Message::system("You are a calculator."));
    assert_eq!(transcript[1], Message::user("What is 2 + 3?"));
    assert_eq!(transcript[2].content(), None);
    assert_eq!(transcript[2].tool_calls()[0].id, "call_1");
    assert_eq!(tool_message(transcript, 3), ("call_1", "add", "Success: 5"));
    assert_eq!(agent.state(), AgentState::Completed);
}

#[tokio::test]
async fn test_first_turn_plain_text_is_not_completion() {
    let provider = MockProvider::scripted(vec![
        text("Let me think about it."),
        text("Here is my final answer."),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("Explain addition").await;

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.result.as_deref(), Some("Here is my final answer."));
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_completion_phrase_on_first_turn() {
    let provider = MockProvider::scripted(vec![text("Nothing to do. TASK Complete")]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("noop").await;
    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.iterations, 1);
}

#[tokio::test]
async fn test_cap_of_one_with_tool_calling_model() {
    let provider = MockProvider::scripted(vec![
        call("c1", "reset", "{}"),
        call("c2", "reset", "{}"),
    ]);
    let mut agent = agent(&provider, 1);

    let result = agent.run("keep resetting").await;

    assert_eq!(result.status, RunStatus::MaxIterationsReached);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.warning.as_deref(), Some(MAX_ITERATIONS_MESSAGE));
    assert_eq!(
        result.result.as_deref(),
        Some("Success: Operation completed successfully.")
    );
    assert_eq!(provider.call_count(), 1);
    assert_eq!(agent.state(), AgentState::MaxIterations);
}

#[tokio::test]
async fn test_budget_is_respected_exactly() {
    let provider = MockProvider::scripted(
        (0..10)
            .map(|i| call(&format!("c{}", i), "reset", "{}"))
            .collect(),
    );
    let mut agent = agent(&provider, 3);

    let result = agent.run("loop forever").await;
    assert_eq!(result.status, RunStatus::MaxIterationsReached);
    assert_eq!(result.iterations, 3);
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn test_cap_with_tool_only_last_turn_uses_placeholder() {
    let provider = MockProvider::scripted(vec![
        GenerateResponse::default(),
        GenerateResponse::default(),
    ]);
    let mut agent = agent(&provider, 2);

    let result = agent.run("say nothing").await;
    assert_eq!(result.status, RunStatus::MaxIterationsReached);
    assert_eq!(result.result.as_deref(), Some(MAX_ITERATIONS_MESSAGE));
}

#[tokio::test]
async fn test_transport_error_is_not_retried() {
    let provider = MockProvider::new(vec![
        Ok(call("c1", "reset", "{}")),
        Err(anyhow::anyhow!("connection reset by peer")),
        Ok(text("never reached, task complete")),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("reset then fail").await;

    assert_eq!(result.status, RunStatus::TransportError);
    assert!(result.result.is_none());
    assert_eq!(result.error.as_deref(), Some("connection reset by peer"));
    assert_eq!(result.iterations, 2);
    assert_eq!(result.transcript.len(), 4);
    assert_eq!(provider.call_count(), 2);
    assert_eq!(agent.state(), AgentState::TransportError);
}

#[tokio::test]
async fn test_faulting_tool_is_reported_and_run_continues() {
    let provider = MockProvider::scripted(vec![
        call("c1", "explode", r#"{"why": "testing"}"#),
        text("The tool failed, task complete."),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("break it").await;

    assert_eq!(result.status, RunStatus::Completed);
    let (_, name, content) = tool_message(&result.transcript, 3);
    assert_eq!(name, "explode");
    assert_eq!(
        content,
        "Error calling explode with arguments:\n{\n  \"why\": \"testing\"\n}\n\nError: calculator on fire"
    );
}

#[tokio::test]
async fn test_unknown_tool_fails_closed() {
    let provider = MockProvider::scripted(vec![
        call("c1", "delete_everything", r#"{"path": "/"}"#),
        text("Could not do it."),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("be dangerous").await;

    let (id, name, content) = tool_message(&result.transcript, 3);
    assert_eq!(id, "c1");
    assert_eq!(name, "delete_everything");
    assert!(content.starts_with("Error calling delete_everything with arguments:"));
    assert!(content.ends_with("Error: Tool 'delete_everything' not found"));
}

#[tokio::test]
async fn test_malformed_arguments_become_empty_bag() {
    let provider = MockProvider::scripted(vec![
        call("c1", "add", "{\"a\": 1, "),
        call("c2", "reset", "not json at all"),
        text("done"),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("sloppy calls").await;

    let (_, _, add) = tool_message(&result.transcript, 3);
    assert_eq!(
        add,
        "Error calling add with arguments:\n{}\n\nError: missing required argument 'a' for tool 'add'"
    );
    let (_, _, reset) = tool_message(&result.transcript, 5);
    assert_eq!(reset, "Success: Operation completed successfully.");
    assert_eq!(result.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_multiple_calls_dispatched_in_order() {
    let order = Arc::new(AtomicUsize::new(0));
    let first = order.clone();
    let second = order.clone();
    let tools = ToolRegistry::from_tools([
        Tool::new("first", move |_| Ok(json!(first.fetch_add(1, Ordering::SeqCst)))),
        Tool::new("second", move |_| Ok(json!(second.fetch_add(1, Ordering::SeqCst)))),
    ])
    .unwrap();

    let provider = MockProvider::scripted(vec![
        GenerateResponse {
            content: Some("Calling both".to_string()),
            tool_calls: vec![
                ToolCall::new("b", "second", "{}"),
                ToolCall::new("a", "first", "{}"),
            ],
        },
        text("task complete"),
    ]);
    let mut agent = Agent::new("role", provider.shared()).with_tools(tools);

    let result = agent.run("order matters").await;

    assert_eq!(result.transcript[2].content(), Some("Calling both"));
    assert_eq!(tool_message(&result.transcript, 3), ("b", "second", "Success: 0"));
    assert_eq!(tool_message(&result.transcript, 4), ("a", "first", "Success: 1"));
}

#[tokio::test]
async fn test_plain_string_tool_returns_quoted_data() {
    let provider = MockProvider::scripted(vec![
        call("c1", "echo", r#"{"text": "Error: this is just data"}"#),
        text("ok"),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("echo").await;
    let (_, _, content) = tool_message(&result.transcript, 3);
    assert_eq!(content, "Success: \"Error: this is just data\"");
}

#[tokio::test]
async fn test_empty_turns_keep_looping() {
    let provider = MockProvider::scripted(vec![
        GenerateResponse::default(),
        GenerateResponse::text(""),
        text("finally"),
    ]);
    let mut agent = agent(&provider, 10);

    let result = agent.run("slow model").await;
    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.iterations, 3);
    assert_eq!(result.result.as_deref(), Some("finally"));
}

#[tokio::test]
async fn test_requests_carry_menu_and_growing_transcript() {
    let provider = MockProvider::scripted(vec![
        call("c1", "add", r#"{"a": 1, "b": 1}"#),
        text("2, task complete"),
    ]);
    let mut agent = agent(&provider, 10).with_model("gpt-test");

    agent.run("1 + 1").await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.config.model.as_deref(), Some("gpt-test"));
        assert_eq!(request.config.tool_choice, Some(ToolChoice::Auto));
        let tools = request.config.tools.as_ref().unwrap();
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[0]["function"]["description"], "Add two integers.");
        assert_eq!(tools[1]["function"]["description"], "Reset the calculator.");
        assert_eq!(tools[2]["function"]["description"], "Tool: explode");
    }
    assert_eq!(requests[0].messages.len(), 2);
    assert_eq!(requests[1].messages.len(), 4);
    assert_eq!(requests[1].messages[3].role(), "tool");
}

#[tokio::test]
async fn test_each_run_starts_fresh() {
    let provider = MockProvider::scripted(vec![text("first, task complete"), text("second, task complete")]);
    let mut agent = agent(&provider, 10);

    agent.run("one").await;
    let result = agent.run("two").await;

    assert_eq!(result.transcript.len(), 3);
    assert_eq!(result.transcript[1], Message::user("two"));
}

#[tokio::test]
async fn test_session_log_records_runs() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::create(dir.path(), "mock-model", 4).unwrap();
    let path = log.path().to_path_buf();

    let provider = MockProvider::scripted(vec![call("c1", "reset", "{}"), text("task complete")]);
    let mut agent = agent(&provider, 4).with_session_log(log);

    agent.run("log me").await;
    agent.save_log().unwrap();

    assert!(path.starts_with(dir.path()));
    let record = agent.session_log().unwrap().read().unwrap();
    assert_eq!(record.model, "mock-model");
    assert_eq!(record.max_iterations, 4);
    // One entry from the finished run, one from the explicit save.
    assert_eq!(record.interactions.len(), 2);
    assert_eq!(record.interactions[0].iteration_count, 2);
    assert_eq!(record.interactions[0].conversation_history.len(), 5);
    assert!(record.last_updated.is_some());
}
