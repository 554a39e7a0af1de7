//! End-to-end launches against a stand-in task runner

#![cfg(unix)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

#[test]
fn test_selected_task_is_launched_with_parameters() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    let taskfile = create_taskfile(temp_dir.path(), SAMPLE_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .env("LATA_TASK_BIN", &fake)
            .current_dir(temp_dir.path()),
        "2\n\nit's \"png\"\n",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        recorded_args(temp_dir.path()),
        vec![
            "--taskfile".to_string(),
            taskfile.display().to_string(),
            "image".to_string(),
            "SIZE=10".to_string(),
            "FORMAT=it's \"png\"".to_string(),
        ]
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task 'image' finished"));
}

#[test]
fn test_child_exit_code_is_passed_through() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), SAMPLE_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .env("LATA_TASK_BIN", &fake)
            .env("FAKE_TASK_EXIT", "3")
            .current_dir(temp_dir.path()),
        "1\n",
    );

    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task 'build' failed (exit code 3)"));
}

#[test]
fn test_cli_args_follow_double_dash() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), SAMPLE_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .arg("--task-bin")
            .arg(&fake)
            .current_dir(temp_dir.path()),
        "3\n--fix ./...\n",
    );

    assert!(output.status.success());
    let args = recorded_args(temp_dir.path());
    assert_eq!(&args[2..], &["lint", "--", "--fix", "./..."]);
}

#[test]
fn test_repeat_runs_several_tasks() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), SAMPLE_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .arg("--repeat")
            .env("LATA_TASK_BIN", &fake)
            .current_dir(temp_dir.path()),
        "1\ny\n3\n\nn\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task 'build' finished"));
    assert!(stdout.contains("Task 'lint' finished"));
    assert_eq!(recorded_args(temp_dir.path())[2], "lint");
}

#[test]
fn test_task_runs_in_taskfile_directory() {
    let binary = get_binary_path();
    let project = create_temp_dir();
    let elsewhere = create_temp_dir();
    let taskfile = create_taskfile(project.path(), SAMPLE_TASKFILE);
    let fake = create_fake_task(project.path());

    let output = run_with_input(
        test_command(&binary)
            .arg(&taskfile)
            .env("LATA_TASK_BIN", &fake)
            .current_dir(elsewhere.path()),
        "1\n",
    );

    assert!(output.status.success());
    assert_eq!(recorded_args(project.path())[1], taskfile.display().to_string());
    assert_eq!(recorded_cwd(project.path()), project.path());
}

#[test]
fn test_relative_taskfile_path_resolves_from_working_directory() {
    let binary = get_binary_path();
    let project = create_temp_dir();
    let ci = project.path().join("ci");
    std::fs::create_dir(&ci).unwrap();
    let taskfile = create_taskfile(&ci, SAMPLE_TASKFILE);
    let fake = create_fake_task(project.path());

    for arg in ["ci/Taskfile.yml", "ci"] {
        let output = run_with_input(
            test_command(&binary)
                .arg(arg)
                .env("LATA_TASK_BIN", &fake)
                .current_dir(project.path()),
            "1\n",
        );

        assert!(
            output.status.success(),
            "lata {arg}: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(recorded_args(project.path())[1], taskfile.display().to_string());
        assert_eq!(recorded_cwd(project.path()), ci);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(&format!("Using Taskfile: {}", taskfile.display())));
    }
}

const PROMPT_TASKFILE: &str = r"
version: '3'

tasks:
  clean:
    desc: Remove build output
    prompt: Remove all build output? y/N
    cmds: ['rm -rf build {{.CLI_ARGS}}']
  tag:
    desc: Tag a release
    prompt: Tag name to create
    cmds: ['git tag {{.CLI_ARGS}}']
";

#[test]
fn test_yes_no_prompt_answer_is_forwarded() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), PROMPT_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .env("LATA_TASK_BIN", &fake)
            .current_dir(temp_dir.path()),
        "1\ny\n",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Remove all build output? y/N"));
    assert_eq!(&recorded_args(temp_dir.path())[2..], &["clean", "--", "y"]);
    assert_eq!(recorded_cli_args(temp_dir.path()), "y");
}

#[test]
fn test_text_prompt_answer_is_one_argument() {
    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), PROMPT_TASKFILE);
    let fake = create_fake_task(temp_dir.path());

    let output = run_with_input(
        test_command(&binary)
            .env("LATA_TASK_BIN", &fake)
            .current_dir(temp_dir.path()),
        "2\nv1.2 beta\n",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(&recorded_args(temp_dir.path())[2..], &["tag", "--", "v1.2 beta"]);
    assert_eq!(recorded_cli_args(temp_dir.path()), "v1.2 beta");
}

#[test]
fn test_task_reads_stdin_left_after_answers() {
    use std::os::unix::fs::PermissionsExt;

    let binary = get_binary_path();
    let temp_dir = create_temp_dir();
    create_taskfile(temp_dir.path(), SAMPLE_TASKFILE);
    let reader = temp_dir.path().join("reading-task");
    let received = temp_dir.path().join("stdin.txt");
    std::fs::write(
        &reader,
        format!(
            "#!/bin/sh\nIFS= read -r line\nprintf '%s' \"$line\" > '{}'\n",
            received.display()
        ),
    )
    .unwrap();
    std::fs::set_permissions(&reader, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = run_with_input(
        test_command(&binary)
            .env("LATA_TASK_BIN", &reader)
            .current_dir(temp_dir.path()),
        "1\nhello from the pipe\n",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(std::fs::read_to_string(&received).unwrap(), "hello from the pipe");
}
