//! Error types shared by every stage of the launcher.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code used for failures that happen before a task is launched.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code used when the user backs out of a prompt.
pub const EXIT_CANCELLED: i32 = 130;

/// Fatal errors. Each one aborts the launch sequence and is reported
/// to the user as a single line.
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("No Taskfile found (looked in: {})", DisplayPaths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Invalid Taskfile {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cancelled")]
    Cancelled,
}

impl LauncherError {
    /// Shorthand for a [`LauncherError::Format`].
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LauncherError::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The process exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::Cancelled => EXIT_CANCELLED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Failures to start the external task runner.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("`{program}` is not installed or not on PATH (see https://taskfile.dev/installation)")]
    NotInstalled { program: String },

    #[error("Failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A rejected menu answer. Never fatal: the menu prints it and asks again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is out of range, pick a number between 1 and {max}")]
    OutOfRange { value: String, max: usize },

    #[error("Please enter a number")]
    Empty,
}

pub type Result<T> = std::result::Result<T, LauncherError>;

struct DisplayPaths<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}
