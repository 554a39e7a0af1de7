//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    // Get the directory where cargo places test binaries
    let mut path = env::current_exe().unwrap();
    path.pop(); // Remove test executable name

    // Check if we're in a 'deps' directory (integration tests)
    if path.ends_with("deps") {
        path.pop(); // Go up to debug or release
    }

    path.push(format!("lata{}", env::consts::EXE_SUFFIX));
    assert!(path.exists(), "lata binary not found at {}", path.display());
    path
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to create a Taskfile.yml in a directory
pub fn create_taskfile(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("Taskfile.yml");
    fs::write(&path, content).unwrap();
    path
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A small Taskfile used by most tests
pub const SAMPLE_TASKFILE: &str = r"
version: '3'

vars:
  SIZE: '10'

tasks:
  build:
    desc: Build the project
    cmds: [echo building]
  image:
    desc: Render an image
    requires:
      vars: [SIZE, FORMAT]
    cmds: [echo image]
  lint:
    desc: Run the linter
    cmds: ['golangci-lint run {{.CLI_ARGS}}']
  secret:
    internal: true
    cmds: [echo hidden]
";

/// Write a stand-in for the `task` executable into `dir`.
///
/// It records its arguments, one per line, in `args.txt` next to itself,
/// its working directory in `cwd.txt`, `$CLI_ARGS` in `cli_args.txt`, and
/// exits with `$FAKE_TASK_EXIT` (default 0).
#[cfg(unix)]
pub fn create_fake_task(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-task");
    let log = dir.join("args.txt");
    let cwd = dir.join("cwd.txt");
    let cli_args = dir.join("cli_args.txt");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\npwd > '{cwd}'\nprintf '%s' \"$CLI_ARGS\" > '{cli_args}'\n: > '{log}'\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{log}'; done\nexit \"${{FAKE_TASK_EXIT:-0}}\"\n",
            cwd = cwd.display(),
            cli_args = cli_args.display(),
            log = log.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

/// Arguments recorded by the fake task runner.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Working directory recorded by the fake task runner.
pub fn recorded_cwd(dir: &Path) -> PathBuf {
    PathBuf::from(fs::read_to_string(dir.join("cwd.txt")).unwrap().trim_end())
}

/// `CLI_ARGS` as seen by the fake task runner.
pub fn recorded_cli_args(dir: &Path) -> String {
    fs::read_to_string(dir.join("cli_args.txt")).unwrap()
}

/// Helper to create a Command with test environment
/// Disables colors and clears variables that would change behaviour
pub fn test_command(binary: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("LATA_TASK_BIN")
        .env_remove("LATA_LOG");
    cmd
}

/// Run `cmd` feeding `input` on stdin and collect its output
pub fn run_with_input(cmd: &mut Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    // The launcher may exit before reading everything (e.g. on errors)
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    child.wait_with_output().unwrap()
}
