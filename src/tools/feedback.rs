//! Feedback channel from agents to the user.

use crate::invoker::{required_str, Tool};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default feedback file, relative to the working directory.
pub const DEFAULT_FEEDBACK_FILE: &str = "user_feedback.txt";

/// Append one line of feedback to `path`.
pub fn append_feedback(path: &Path, information: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open feedback file: {}", path.display()))?;
    writeln!(file, "{}", information)
        .with_context(|| format!("Failed to write feedback file: {}", path.display()))
}

/// The `report_weakness_to_user` tool, writing to `path`.
///
/// Returns nothing on success, so the model sees the generic success text.
pub fn report_weakness_tool(path: impl Into<PathBuf>) -> Tool {
    let path = path.into();
    Tool::new("report_weakness_to_user", move |args| {
        append_feedback(&path, required_str(args, "information")?)?;
        Ok(Value::Null)
    })
    .doc(
        "Report a weakness area to the user: a place where the job requirement and the user's experience do not align.

Guidelines:
- Say what the requirement asks for that the experience lacks.
- Add actionable feedback on how the user could improve.
- Keep your answer concise.",
    )
    .param::<String>("information")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::{parse_arguments, ResultFormatter, ToolInvoker, ToolRegistry};
    use tempfile::tempdir;

    #[test]
    fn test_report_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        let invoker = ToolInvoker::new(ToolRegistry::from_tools([report_weakness_tool(&path)]).unwrap());

        let first = invoker.invoke(
            "report_weakness_to_user",
            parse_arguments(r#"{"information": "No Kubernetes experience"}"#),
        );
        invoker.invoke(
            "report_weakness_to_user",
            parse_arguments(r#"{"information": "No PCIe work"}"#),
        );

        assert_eq!(
            ResultFormatter::format(&first),
            "Success: Operation completed successfully."
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "No Kubernetes experience\nNo PCIe work\n"
        );
    }

    #[test]
    fn test_contract_keeps_guidelines() {
        let contract = report_weakness_tool(DEFAULT_FEEDBACK_FILE).contract();
        assert!(contract.description.starts_with("Report a weakness area"));
        assert!(contract.description.contains("Keep your answer concise."));
        assert_eq!(contract.required(), vec!["information"]);
    }
}
