//! The launch sequence: locate → parse → present → collect → invoke.

use crate::config::{self, SearchPaths};
use crate::error::{LauncherError, Result};
use crate::executor::{self, DEFAULT_TASK_PROGRAM, TaskCommand};
use crate::model::{Selection, Taskfile};
use crate::{menu, prompt, taskfile};
use colored::Colorize;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Everything that shapes one launcher run.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit Taskfile (file or directory)
    pub taskfile: Option<PathBuf>,
    /// Task runner executable, looked up on `PATH`
    pub task_program: OsString,
    /// Print the command instead of running it
    pub dry_run: bool,
    /// Offer to run another task after each one
    pub repeat: bool,
    /// Default locations searched when `taskfile` is `None`
    pub search: SearchPaths,
}

impl LaunchOptions {
    /// Options for `taskfile` with the search paths of this process.
    #[must_use]
    pub fn new(taskfile: Option<PathBuf>) -> Self {
        Self {
            taskfile,
            task_program: DEFAULT_TASK_PROGRAM.into(),
            dry_run: false,
            repeat: false,
            search: SearchPaths::from_env(),
        }
    }
}

pub struct Launcher {
    options: LaunchOptions,
}

impl Launcher {
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }

    /// Locate and parse the Taskfile.
    ///
    /// # Errors
    ///
    /// [`LauncherError::NotFound`] or [`LauncherError::Format`].
    pub fn load(&self) -> Result<Taskfile> {
        let path = config::locate(self.options.taskfile.as_deref(), &self.options.search)?;
        tracing::debug!(path = %path.display(), "using taskfile");
        taskfile::parse(&path)
    }

    /// Show the menu and gather what the chosen task needs.
    ///
    /// # Errors
    ///
    /// [`LauncherError::Cancelled`] if the user backs out.
    pub fn select<R: BufRead, W: Write>(
        &self,
        taskfile: &Taskfile,
        input: &mut R,
        output: &mut W,
    ) -> Result<Selection> {
        let index = menu::present(&taskfile.tasks, input, output)?;
        let task = taskfile.tasks[index].clone();
        let parameters = prompt::collect(&task, input, output)?;
        let cli_args = prompt::collect_cli_args(&task, input, output)?;
        Ok(Selection {
            task,
            parameters,
            cli_args,
        })
    }

    #[must_use]
    pub fn command(&self, taskfile: &Taskfile, selection: &Selection) -> TaskCommand {
        TaskCommand::new(
            self.options.task_program.clone(),
            taskfile.path.clone(),
            selection.task.name.clone(),
            selection.parameters.clone(),
            selection.cli_args.clone(),
        )
    }

    /// Run the whole sequence against the given terminal streams and
    /// return the exit code of the last task launched.
    ///
    /// # Errors
    ///
    /// Any failure before a task is launched, including cancellation.
    /// A task that fails is not an error: its exit code is returned.
    pub fn run_with<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<i32> {
        let taskfile = self.load()?;

        writeln!(output, "{}", "Taskfile launcher".blue().bold())?;
        writeln!(
            output,
            "{}",
            format!("Using Taskfile: {}", taskfile.path.display()).blue()
        )?;
        writeln!(output)?;

        loop {
            let selection = self.select(&taskfile, input, output)?;
            let command = self.command(&taskfile, &selection);
            let name = &selection.task.name;

            let code = if self.options.dry_run {
                writeln!(output, "{}", command.display())?;
                0
            } else {
                writeln!(output, "{}", format!("Running task: {name}").blue())?;
                output.flush()?;
                let code = executor::invoke(&command)?;
                if code == 0 {
                    writeln!(output, "{}", format!("Task '{name}' finished").green())?;
                } else {
                    writeln!(
                        output,
                        "{}",
                        format!("Task '{name}' failed (exit code {code})").red()
                    )?;
                }
                code
            };

            if !self.options.repeat {
                return Ok(code);
            }
            writeln!(output)?;
            if !prompt::confirm("Run another task?", input, output)? {
                return Ok(code);
            }
            writeln!(output)?;
        }
    }

    /// Run against the process's own stdin and stdout, reporting any error
    /// on stderr. Returns the exit code for the process.
    ///
    /// The task inherits stdin, so answers are read without read-ahead and
    /// any input after the last answer is left for the task.
    #[must_use]
    pub fn run(&self) -> i32 {
        let stdout = io::stdout();
        let result = answers()
            .map_err(LauncherError::from)
            .and_then(|mut input| self.run_with(&mut input, &mut stdout.lock()));
        match result {
            Ok(code) => code,
            Err(e) => report(&e),
        }
    }
}

/// Stdin read one byte at a time, bypassing the buffer of [`io::Stdin`].
#[cfg(unix)]
fn answers() -> io::Result<impl BufRead> {
    use std::os::fd::AsFd;

    let fd = io::stdin().as_fd().try_clone_to_owned()?;
    Ok(io::BufReader::with_capacity(1, std::fs::File::from(fd)))
}

// TODO: read the console handle unbuffered on Windows too; piped input
// after the last answer may be consumed by the launcher there.
#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn answers() -> io::Result<impl BufRead> {
    Ok(io::stdin().lock())
}

/// Print `err` as one line on stderr and return its exit code.
#[must_use]
pub fn report(err: &LauncherError) -> i32 {
    match err {
        LauncherError::Cancelled => eprintln!("{}", "Cancelled, no task was run.".yellow()),
        other => eprintln!("{} {other}", "Error:".red().bold()),
    }
    err.exit_code()
}
