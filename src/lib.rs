//! # lata
//!
//! An interactive launcher for [Taskfile](https://taskfile.dev) tasks.
//! It finds a `Taskfile.yml`, shows its tasks as a numbered menu, asks for
//! any variables the chosen task requires, and hands off to the `task`
//! executable. The exit code of the task becomes the launcher's own.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod launcher;
pub mod logging;
pub mod menu;
pub mod model;
pub mod prompt;
pub mod taskfile;

pub use error::{ExecutionError, LauncherError, Result, SelectionError};
pub use launcher::{LaunchOptions, Launcher};
pub use model::{ParameterSpec, Parameters, Selection, TaskDefinition, Taskfile};

use std::path::Path;

/// Run the launcher with an optional explicit Taskfile and return the exit
/// code for the process.
pub fn launch(taskfile: Option<&Path>) -> i32 {
    Launcher::new(LaunchOptions::new(taskfile.map(Path::to_path_buf))).run()
}

/// Run the launcher with the default Taskfile lookup.
pub fn start() -> i32 {
    launch(None)
}
