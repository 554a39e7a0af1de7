//! Taskfile parsing.
//!
//! The YAML is first loaded into a loosely typed [`serde_yaml::Value`] and
//! only the fields the launcher needs are pulled out of it. Everything else
//! (and any key the task runner adds later) is ignored.

use crate::error::{LauncherError, Result};
use crate::model::{ParameterSpec, TaskDefinition, Taskfile};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Read and parse the Taskfile at `path`.
///
/// # Errors
///
/// Returns [`LauncherError::Format`] when the file cannot be read, is not
/// valid YAML, or has no usable `tasks` mapping.
pub fn parse(path: &Path) -> Result<Taskfile> {
    let source = fs::read_to_string(path)
        .map_err(|e| LauncherError::format(path, format!("cannot read file: {e}")))?;
    let tasks = parse_str(&source).map_err(|message| LauncherError::format(path, message))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "parsed taskfile");
    Ok(Taskfile {
        path: path.to_path_buf(),
        tasks,
    })
}

/// Extract the callable tasks from Taskfile source, in declaration order.
///
/// # Errors
///
/// Returns a description of the problem when the YAML is malformed
/// (duplicate task names included), the top level has no `tasks`
/// mapping, or no task can be called from the command line.
pub fn parse_str(source: &str) -> std::result::Result<Vec<TaskDefinition>, String> {
    let document: Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;

    let root = match &document {
        Value::Mapping(map) => map,
        Value::Null => return Err("file is empty".to_string()),
        _ => return Err("top level must be a mapping".to_string()),
    };

    let tasks = match root.get("tasks") {
        Some(Value::Mapping(tasks)) => tasks,
        Some(_) => return Err("`tasks` must be a mapping of task names".to_string()),
        None => return Err("missing `tasks` section".to_string()),
    };

    let globals = root.get("vars").and_then(Value::as_mapping);

    let mut definitions = Vec::with_capacity(tasks.len());
    for (key, body) in tasks {
        let name = scalar_to_string(key).ok_or_else(|| "task names must be plain strings".to_string())?;
        let body = untag(body);

        if is_internal(body) {
            tracing::trace!(task = %name, "skipping internal task");
            continue;
        }
        definitions.push(task_definition(name, body, globals));
    }

    if definitions.is_empty() {
        return Err("no callable tasks declared".to_string());
    }
    Ok(definitions)
}

fn task_definition(name: String, body: &Value, globals: Option<&Mapping>) -> TaskDefinition {
    let fields = body.as_mapping();
    let text = |key: &str| {
        fields
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    TaskDefinition {
        description: text("desc"),
        summary: text("summary"),
        parameters: fields
            .map(|m| required_vars(m, globals))
            .unwrap_or_default(),
        accepts_cli_args: mentions_cli_args(body),
        prompt: fields.and_then(|m| m.get("prompt")).and_then(prompt_text),
        name,
    }
}

/// `prompt` is a string or a list of strings; a list is shown as one line.
fn prompt_text(value: &Value) -> Option<String> {
    let text = match untag(value) {
        Value::String(s) => s.trim().to_string(),
        Value::Sequence(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn is_internal(body: &Value) -> bool {
    body.as_mapping()
        .and_then(|m| m.get("internal"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// `requires: { vars: [...] }` entries, each a bare name or `{ name, enum }`.
fn required_vars(task: &Mapping, globals: Option<&Mapping>) -> Vec<ParameterSpec> {
    let Some(vars) = task
        .get("requires")
        .and_then(|r| r.get("vars"))
        .and_then(Value::as_sequence)
    else {
        return Vec::new();
    };

    vars.iter()
        .filter_map(|entry| {
            let mut spec = match untag(entry) {
                Value::Mapping(m) => {
                    let mut spec = ParameterSpec::new(m.get("name").and_then(scalar_to_string)?);
                    if let Some(choices) = m.get("enum").and_then(Value::as_sequence) {
                        spec.choices = choices.iter().filter_map(scalar_to_string).collect();
                    }
                    spec
                }
                other => ParameterSpec::new(scalar_to_string(other)?),
            };
            spec.default = globals.and_then(|g| g.get(spec.name.as_str())).and_then(static_value);
            Some(spec)
        })
        .collect()
}

/// A global variable usable as a default: plain scalars only, no
/// templates and no `sh:` maps.
fn static_value(value: &Value) -> Option<String> {
    let value = match untag(value) {
        Value::Mapping(m) => m.get("value")?,
        other => other,
    };
    scalar_to_string(value).filter(|s| !s.contains("{{"))
}

fn mentions_cli_args(value: &Value) -> bool {
    match untag(value) {
        Value::String(s) => s.contains(".CLI_ARGS"),
        Value::Sequence(items) => items.iter().any(mentions_cli_args),
        Value::Mapping(m) => m.values().any(mentions_cli_args),
        _ => false,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}
