//! Command-line entry point.

use crate::executor::DEFAULT_TASK_PROGRAM;
use crate::launcher::{self, LaunchOptions, Launcher};
use crate::{logging, menu};
use clap::Parser as ClapParser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for the launcher.
#[derive(ClapParser, Debug)]
#[command(name = "lata")]
#[command(version = PKG_VERSION)]
#[command(about = "Pick a task from a Taskfile and run it", long_about = None)]
pub struct Cli {
    /// Taskfile to use (file or directory). Defaults to the Taskfile next
    /// to this executable, then ./Taskfile.yml
    #[arg(value_name = "TASKFILE")]
    pub taskfile: Option<PathBuf>,

    /// Print the numbered task list and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the parsed tasks as JSON and exit
    #[arg(long, conflicts_with = "list")]
    pub inspect: bool,

    /// Show the task command instead of running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Offer to run another task after each one finishes
    #[arg(short, long)]
    pub repeat: bool,

    /// Task runner executable
    #[arg(long, value_name = "PATH", env = "LATA_TASK_BIN", default_value = DEFAULT_TASK_PROGRAM)]
    pub task_bin: OsString,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            task_program: self.task_bin.clone(),
            dry_run: self.dry_run,
            repeat: self.repeat,
            ..LaunchOptions::new(self.taskfile.clone())
        }
    }
}

/// Print the task list without prompting.
fn list_tasks(launcher: &Launcher) -> crate::error::Result<()> {
    let taskfile = launcher.load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    menu::render(&taskfile.tasks, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Print the parsed Taskfile as JSON.
fn inspect_tasks(launcher: &Launcher) -> crate::error::Result<()> {
    let taskfile = launcher.load()?;
    let json = serde_json::to_string_pretty(&taskfile)
        .map_err(|e| crate::error::LauncherError::format(&taskfile.path, e.to_string()))?;
    println!("{json}");
    Ok(())
}

/// Parse arguments, run the launcher and return the process exit code.
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let launcher = Launcher::new(cli.launch_options());

    let result = if cli.list {
        list_tasks(&launcher).map(|()| 0)
    } else if cli.inspect {
        inspect_tasks(&launcher).map(|()| 0)
    } else {
        return launcher.run();
    };

    result.unwrap_or_else(|e| launcher::report(&e))
}
