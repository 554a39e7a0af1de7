//! Building and running the external `task` command.

use crate::error::ExecutionError;
use crate::model::Parameters;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Default name of the task runner executable.
pub const DEFAULT_TASK_PROGRAM: &str = "task";

/// One invocation of the task runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCommand {
    program: OsString,
    taskfile: PathBuf,
    task: String,
    parameters: Parameters,
    cli_args: Vec<String>,
}

impl TaskCommand {
    pub fn new(
        program: impl Into<OsString>,
        taskfile: impl Into<PathBuf>,
        task: impl Into<String>,
        parameters: Parameters,
        cli_args: Vec<String>,
    ) -> Self {
        Self {
            program: program.into(),
            taskfile: taskfile.into(),
            task: task.into(),
            parameters,
            cli_args,
        }
    }

    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Arguments passed to the program:
    /// `--taskfile <path> <task> [NAME=value ...] [-- args ...]`.
    ///
    /// Every `NAME=value` pair is a single argument, so a value holding
    /// spaces or quotes cannot split or merge arguments.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--taskfile".into(),
            self.taskfile.clone().into_os_string(),
            self.task.clone().into(),
        ];
        args.extend(
            self.parameters
                .iter()
                .map(|(name, value)| OsString::from(format!("{name}={value}"))),
        );
        if !self.cli_args.is_empty() {
            args.push("--".into());
            args.extend(self.cli_args.iter().map(OsString::from));
        }
        args
    }

    /// The equivalent shell command line, each word quoted as needed.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args().iter().map(OsString::as_os_str))
            .map(|word| shell_quote(&word.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Directory the task runner is started in: the Taskfile's own.
    fn working_dir(&self) -> Option<&Path> {
        self.taskfile
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// The [`Command`] that runs this invocation with inherited stdio.
    #[must_use]
    pub fn to_command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = self.working_dir() {
            cmd.current_dir(dir);
        }
        if !self.cli_args.is_empty() {
            cmd.env("CLI_ARGS", self.cli_args.join(" "));
        }
        cmd
    }
}

/// Quote `word` for a POSIX shell. Words made only of safe characters are
/// left alone; anything else is wrapped in single quotes.
#[must_use]
pub fn shell_quote(word: &str) -> String {
    if word.is_empty() {
        "''".to_string()
    } else if word.bytes().all(|b| {
        matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'/' | b':' | b'=' | b'+' | b'@' | b'%' | b',')
    }) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

/// Find the program on `PATH`. Names containing a path separator are
/// checked as given.
///
/// # Errors
///
/// [`ExecutionError::NotInstalled`] when nothing executable is found.
pub fn resolve_program(program: &OsStr) -> Result<PathBuf, ExecutionError> {
    which::which(program).map_err(|e| {
        tracing::debug!(program = %program.to_string_lossy(), error = %e, "program lookup failed");
        ExecutionError::NotInstalled {
            program: program.to_string_lossy().into_owned(),
        }
    })
}

/// Run the command and wait for it, returning its exit code unchanged.
///
/// # Errors
///
/// [`ExecutionError::NotInstalled`] if the program cannot be found,
/// [`ExecutionError::Launch`] if it cannot be started.
pub fn invoke(command: &TaskCommand) -> Result<i32, ExecutionError> {
    let program = resolve_program(command.program())?;
    tracing::debug!(command = %command.display(), "launching task runner");

    let status = command
        .to_command(&program)
        .status()
        .map_err(|source| ExecutionError::Launch {
            program: command.program().to_string_lossy().into_owned(),
            source,
        })?;

    let code = exit_code(status);
    tracing::debug!(task = %command.task(), code, "task runner exited");
    Ok(code)
}

/// Map an exit status to a process exit code. A child killed by a signal
/// reports `128 + signal`, as shells do.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
