//! File inspection and editing tools.
//!
//! `read_file_lines` is 0-indexed, `write_file_lines` is 1-indexed; both
//! ranges are inclusive and clamp an out-of-range end to the file length.

use crate::invoker::{required_i64, required_str, required_string_list, Tool, ToolRegistry};
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Split file content into lines, each keeping its terminator.
fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

fn read_lines(path: &str) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    Ok(split_lines(&content))
}

/// Count the lines of a file.
pub fn get_file_line_count(filepath: &str) -> Result<Value> {
    let line_count = read_lines(filepath)?.len();
    Ok(json!({
        "filepath": filepath,
        "line_count": line_count,
    }))
}

/// List a directory with a type and extension for each entry.
pub fn list_dir(path: &str) -> Result<Value> {
    let entries = fs::read_dir(path).with_context(|| format!("Failed to list {}", path))?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let is_dir = entry.path().is_dir();
        let extension = if is_dir {
            Value::Null
        } else {
            Path::new(&name)
                .extension()
                .map(|ext| Value::String(format!(".{}", ext.to_string_lossy())))
                .unwrap_or_else(|| Value::String(String::new()))
        };
        items.push(json!({
            "name": name,
            "type": if is_dir { "directory" } else { "file" },
            "extension": extension,
        }));
    }
    items.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

    Ok(json!({
        "path": path,
        "count": items.len(),
        "items": items,
    }))
}

/// Case-insensitive substring search; line numbers are 1-indexed.
pub fn search_in_file(filepath: &str, query: &str) -> Result<Value> {
    let needle = query.to_lowercase();
    let matches: Vec<Value> = read_lines(filepath)?
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(&needle))
        .map(|(i, line)| json!({"line_number": i + 1, "content": line.trim()}))
        .collect();

    Ok(json!({
        "filepath": filepath,
        "query": query,
        "count": matches.len(),
        "matches": matches,
    }))
}

/// Read lines `start_line..=end_line` (0-indexed).
pub fn read_file_lines(filepath: &str, start_line: i64, end_line: i64) -> Result<Value> {
    let lines = read_lines(filepath)?;
    let total_lines = lines.len() as i64;

    if start_line < 0 {
        bail!("start_line must be >= 0, got {}", start_line);
    }
    if end_line < start_line {
        bail!("end_line ({}) must be >= start_line ({})", end_line, start_line);
    }
    if start_line >= total_lines {
        bail!(
            "start_line ({}) exceeds or equals file length ({})",
            start_line,
            total_lines
        );
    }

    let end_line = end_line.min(total_lines - 1);
    let content: Vec<&str> = lines[start_line as usize..=end_line as usize]
        .iter()
        .map(|l| l.strip_suffix('\n').unwrap_or(l))
        .collect();

    Ok(json!({
        "filepath": filepath,
        "start_line": start_line,
        "end_line": end_line,
        "total_lines": total_lines,
        "line_count": content.len(),
        "content": content,
    }))
}

/// Replace lines `start_line..=end_line` (1-indexed) with `new_content`.
pub fn write_file_lines(filepath: &str, start_line: i64, end_line: i64, new_content: &[String]) -> Result<Value> {
    let mut lines = read_lines(filepath)?;
    let total_lines = lines.len() as i64;

    if start_line < 1 {
        bail!("start_line must be >= 1, got {}", start_line);
    }
    if end_line < start_line {
        bail!("end_line ({}) must be >= start_line ({})", end_line, start_line);
    }
    if start_line > total_lines {
        bail!("start_line ({}) exceeds file length ({})", start_line, total_lines);
    }

    let end_line = end_line.min(total_lines);
    let replacement = new_content.iter().map(|line| {
        if line.ends_with('\n') {
            line.clone()
        } else {
            format!("{}\n", line)
        }
    });
    lines.splice((start_line - 1) as usize..end_line as usize, replacement);

    fs::write(filepath, lines.concat()).with_context(|| format!("Failed to write {}", filepath))?;

    Ok(json!({
        "status": "success",
        "filepath": filepath,
        "start_line": start_line,
        "end_line": end_line,
        "old_line_count": end_line - start_line + 1,
        "new_line_count": new_content.len(),
        "total_lines": lines.len(),
    }))
}

/// The five file tools, ready to register.
pub fn file_tools() -> Vec<Tool> {
    vec![
        Tool::new("get_file_line_count", |args| {
            get_file_line_count(required_str(args, "filepath")?)
        })
        .doc("Get the total number of lines in a file")
        .param::<String>("filepath"),
        Tool::new("list_dir", |args| list_dir(required_str(args, "path")?))
            .doc("List directory contents with file type information")
            .param::<String>("path"),
        Tool::new("search_in_file", |args| {
            search_in_file(required_str(args, "filepath")?, required_str(args, "query")?)
        })
        .doc("Search for a query string within a file's contents (case-insensitive). Returns matching lines with 1-indexed line numbers.")
        .param::<String>("filepath")
        .param::<String>("query"),
        Tool::new("read_file_lines", |args| {
            read_file_lines(
                required_str(args, "filepath")?,
                required_i64(args, "start_line")?,
                required_i64(args, "end_line")?,
            )
        })
        .doc("Read specific lines from a file. start_line and end_line are 0-indexed and inclusive.")
        .param::<String>("filepath")
        .param::<i64>("start_line")
        .param::<i64>("end_line"),
        Tool::new("write_file_lines", |args| {
            write_file_lines(
                required_str(args, "filepath")?,
                required_i64(args, "start_line")?,
                required_i64(args, "end_line")?,
                &required_string_list(args, "new_content")?,
            )
        })
        .doc("Replace a range of lines in a file with new content. start_line and end_line are 1-indexed and inclusive; each string in new_content becomes one line.")
        .param::<String>("filepath")
        .param::<i64>("start_line")
        .param::<i64>("end_line")
        .param::<Vec<String>>("new_content"),
    ]
}

/// Registry holding only the file tools.
pub fn file_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in file_tools() {
        registry.register_or_replace(tool);
    }
    registry
}
