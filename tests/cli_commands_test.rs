//! Command tests: `ask` and `plan` against a scripted model.

mod common;

use common::{call, text, MockProvider};
use std::fs;
use tool_agent::agent::RunStatus;
use tool_agent::cli::commands::{execute_ask, execute_plan};
use tool_agent::cli::{AskArgs, CliError, CommandContext, PlanArgs};
use tool_agent::config::{Configuration, ConfigurationLoader, EnvironmentLoader};

fn context(log_dir: &std::path::Path, session_log: bool) -> CommandContext {
    let mut config = Configuration::default();
    config.agent.max_iterations = 3;
    config.logging.log_dir = log_dir.to_string_lossy().into_owned();
    config.logging.session_log = session_log;
    CommandContext::from_parts(ConfigurationLoader::from_config(config), EnvironmentLoader::new(None))
}

fn ask_args(task: &str) -> AskArgs {
    AskArgs {
        task: task.split(' ').map(String::from).collect(),
        system: "You read files.".to_string(),
        model: None,
        max_iterations: None,
        session_log: false,
    }
}

#[tokio::test]
async fn test_ask_uses_file_tools_and_config_budget() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "one\ntwo\nthree\n").unwrap();

    let arguments = serde_json::json!({ "filepath": notes.to_string_lossy() }).to_string();
    let provider = MockProvider::scripted(vec![
        call("c1", "get_file_line_count", &arguments),
        text("The file has 3 lines. Task complete."),
    ]);
    let ctx = context(dir.path(), false);

    let result = execute_ask(&ctx, provider.shared(), &ask_args("count the lines")).await;

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.transcript[1].content(), Some("count the lines"));
    let tool_output = result.transcript[3].content().unwrap();
    assert!(tool_output.starts_with("Success: {"));
    assert!(tool_output.contains("\"line_count\": 3"));

    let requests = provider.requests();
    assert_eq!(requests[0].config.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(requests[0].config.tools.as_ref().unwrap().len(), 5);
}

#[tokio::test]
async fn test_ask_budget_override_and_forced_session_log() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    let provider = MockProvider::scripted(vec![
        call("c1", "list_dir", r#"{"path": "."}"#),
        call("c2", "list_dir", r#"{"path": "."}"#),
    ]);
    let ctx = context(&logs, false);
    let mut args = ask_args("wander around");
    args.max_iterations = Some(1);
    args.session_log = true;

    let result = execute_ask(&ctx, provider.shared(), &args).await;

    assert_eq!(result.status, RunStatus::MaxIterationsReached);
    assert_eq!(provider.call_count(), 1);
    let entries: Vec<_> = fs::read_dir(&logs).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_plan_reads_inputs_and_writes_feedback() {
    let dir = tempfile::tempdir().unwrap();
    let job = dir.path().join("job.txt");
    let experience = dir.path().join("experience.txt");
    let feedback = dir.path().join("feedback.txt");
    fs::write(&job, "Needs Go and Rust").unwrap();
    fs::write(&experience, "Rust only").unwrap();

    let provider = MockProvider::scripted(vec![
        call("p1", "add_action_item", r#"{"action_item": "Check language fit"}"#),
        text("task complete"),
        call("w1", "report_weakness_to_user", r#"{"information": "No Go experience"}"#),
        text("task complete"),
    ]);
    let ctx = context(dir.path(), false);
    let args = PlanArgs {
        job,
        experience,
        feedback_file: feedback.clone(),
        with_file_tools: false,
    };

    let report = execute_plan(&ctx, provider.shared(), &args).await.unwrap();

    assert_eq!(report.items, ["Check language fit"]);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(fs::read_to_string(&feedback).unwrap(), "No Go experience\n");

    let executor_request = &provider.requests()[2];
    let user = executor_request.messages[1].content().unwrap();
    assert!(user.contains("Rust only"));
    assert!(user.contains("Check language fit"));
    assert!(!user.contains("Needs Go and Rust"));
}

#[tokio::test]
async fn test_plan_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![]);
    let ctx = context(dir.path(), false);
    let args = PlanArgs {
        job: dir.path().join("missing.txt"),
        experience: dir.path().join("missing.txt"),
        feedback_file: dir.path().join("feedback.txt"),
        with_file_tools: true,
    };

    let err = execute_plan(&ctx, provider.shared(), &args).await.unwrap_err();

    assert!(matches!(err, CliError::IoError(_)));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_missing_env_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("agent.toml");
    let env_file = dir.path().join("missing.env");

    let err = CommandContext::load(Some(&config), Some(&env_file)).unwrap_err();

    assert!(matches!(err, CliError::ConfigError(_)));
    assert!(err.to_string().contains("missing.env"));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_config_source_reports_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("agent.toml");
    let env_file = dir.path().join("test.env");
    fs::write(&env_file, "").unwrap();

    let ctx = CommandContext::load(Some(&config), Some(&env_file)).unwrap();
    assert!(ctx.config_source().starts_with("No configuration at"));
    assert!(ctx.config_source().ends_with("using defaults"));

    fs::write(&config, "[agent]\nmax_iterations = 4\n").unwrap();
    let ctx = CommandContext::load(Some(&config), Some(&env_file)).unwrap();
    assert_eq!(ctx.config.config.agent.max_iterations, 4);
    assert_eq!(
        ctx.config_source(),
        format!("Loaded configuration from {}", config.display())
    );
}
