//! Numbered task menu.

use crate::error::{LauncherError, Result, SelectionError};
use crate::model::TaskDefinition;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Answers that leave the menu without picking anything.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Write one line per task: `  <n>: <name> — <description>`.
///
/// # Errors
///
/// Any error from writing to `output`.
pub fn render(tasks: &[TaskDefinition], output: &mut impl Write) -> std::io::Result<()> {
    let width = tasks.len().to_string().len();
    for (i, task) in tasks.iter().enumerate() {
        let index = format!("{:>width$}", i + 1);
        match task.menu_description() {
            Some(desc) => writeln!(
                output,
                "  {}: {} — {}",
                index.cyan(),
                task.name.bold(),
                desc.dimmed()
            )?,
            None => writeln!(output, "  {}: {}", index.cyan(), task.name.bold())?,
        }
    }
    Ok(())
}

/// Validate a menu answer against `len` tasks, returning a 0-based index.
///
/// # Errors
///
/// Anything but an integer in `1..=len` is rejected.
pub fn parse_selection(input: &str, len: usize) -> std::result::Result<usize, SelectionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::Empty);
    }
    let out_of_range = || SelectionError::OutOfRange {
        value: trimmed.to_string(),
        max: len,
    };
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectionError::NotANumber(trimmed.to_string()));
    }

    // Integers too large for i64 are still integers, just out of range
    let value: i64 = trimmed.parse().map_err(|_| out_of_range())?;
    match usize::try_from(value) {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(out_of_range()),
    }
}

/// Show the menu and read answers until one names a task.
///
/// Invalid answers print an error and prompt again, as many times as it
/// takes. Returns the 0-based index of the chosen task.
///
/// # Errors
///
/// [`LauncherError::Cancelled`] when the user types a quit word or input
/// ends; [`LauncherError::Io`] when the terminal cannot be read or written.
pub fn present<R: BufRead, W: Write>(
    tasks: &[TaskDefinition],
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    render(tasks, output)?;
    writeln!(output, "{}", "Press q or Ctrl+C to quit".dimmed())?;

    let mut line = String::new();
    loop {
        write!(
            output,
            "\n{} ",
            format!("Select a task [1-{}]:", tasks.len()).green().bold()
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Err(LauncherError::Cancelled);
        }

        let answer = line.trim();
        if QUIT_WORDS.iter().any(|w| answer.eq_ignore_ascii_case(w)) {
            return Err(LauncherError::Cancelled);
        }

        match parse_selection(answer, tasks.len()) {
            Ok(index) => {
                tracing::debug!(task = %tasks[index].name, "task selected");
                return Ok(index);
            }
            Err(e) => writeln!(output, "{}", e.to_string().red())?,
        }
    }
}
