//! Prompts for the variables a task requires.

use crate::error::{LauncherError, Result};
use crate::model::{ParameterSpec, Parameters, TaskDefinition};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Read one line; `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_label(spec: &ParameterSpec) -> String {
    let mut label = spec.name.clone();
    if !spec.choices.is_empty() {
        label.push_str(&format!(" ({})", spec.choices.join("/")));
    }
    if let Some(default) = &spec.default {
        label.push_str(&format!(" [{default}]"));
    }
    label.push(':');
    label
}

/// Ask for one parameter until an acceptable value is given.
fn ask<R: BufRead, W: Write>(spec: &ParameterSpec, input: &mut R, output: &mut W) -> Result<String> {
    let label = prompt_label(spec);
    loop {
        write!(output, "{} ", label.yellow())?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            writeln!(output)?;
            return Err(LauncherError::Cancelled);
        };

        let value = if answer.is_empty() {
            match &spec.default {
                Some(default) => default.clone(),
                None => {
                    writeln!(output, "{}", format!("{} is required", spec.name).red())?;
                    continue;
                }
            }
        } else {
            answer
        };

        if !spec.choices.is_empty() && !spec.choices.contains(&value) {
            writeln!(
                output,
                "{}",
                format!("'{value}' is not one of: {}", spec.choices.join(", ")).red()
            )?;
            continue;
        }
        return Ok(value);
    }
}

/// Collect a value for every parameter of `task`, in declared order.
///
/// An empty answer takes the default when there is one and asks again
/// otherwise. Tasks without parameters return an empty mapping without
/// printing anything.
///
/// # Errors
///
/// [`LauncherError::Cancelled`] when input ends before every value is
/// known; [`LauncherError::Io`] on terminal failures.
pub fn collect<R: BufRead, W: Write>(
    task: &TaskDefinition,
    input: &mut R,
    output: &mut W,
) -> Result<Parameters> {
    let mut values = Parameters::new();
    for spec in &task.parameters {
        let value = ask(spec, input, output)?;
        values.insert(spec.name.clone(), value);
    }
    Ok(values)
}

/// Ask for the arguments forwarded after `--` (and as `CLI_ARGS`).
///
/// A task with a `prompt` asks that question: text containing `y/N` is a
/// yes/no question answered with `y` or `n`, anything else takes one
/// free-text argument. Otherwise, a task that uses `CLI_ARGS` is asked for
/// optional extra arguments, split on whitespace. Empty answers mean none.
///
/// # Errors
///
/// [`LauncherError::Cancelled`] at end of input.
pub fn collect_cli_args<R: BufRead, W: Write>(
    task: &TaskDefinition,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<String>> {
    if let Some(text) = &task.prompt {
        write!(output, "{} ", text.yellow())?;
        output.flush()?;
        let answer = required_answer(input, output)?;
        if text.contains("y/N") {
            return Ok(vec![if is_yes(&answer) { "y" } else { "n" }.to_string()]);
        }
        return Ok(if answer.is_empty() { Vec::new() } else { vec![answer] });
    }

    if !task.accepts_cli_args {
        return Ok(Vec::new());
    }

    write!(output, "{} ", "Extra arguments (optional):".yellow())?;
    output.flush()?;
    let answer = required_answer(input, output)?;
    Ok(answer.split_whitespace().map(str::to_string).collect())
}

/// Read one answer, treating end of input as cancellation.
fn required_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    match read_answer(input)? {
        Some(answer) => Ok(answer),
        None => {
            writeln!(output)?;
            Err(LauncherError::Cancelled)
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Yes/no question defaulting to no.
///
/// # Errors
///
/// [`LauncherError::Io`] on terminal failures. End of input counts as no.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} ", format!("{question} [y/N]").yellow())?;
    output.flush()?;
    Ok(read_answer(input)?.is_some_and(|a| is_yes(&a)))
}
