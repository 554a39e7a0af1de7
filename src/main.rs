//! # lata
//!
//! Pick a task from a Taskfile and run it.
//!
//! ## Usage
//!
//! - Use the default Taskfile: `lata`
//! - Use a specific one: `lata path/to/Taskfile.yml`
//! - Just list the tasks: `lata --list`
//! - See the command without running it: `lata --dry-run`

/// Entry point for the CLI tool.
fn main() {
    std::process::exit(lata::cli::run_cli());
}
