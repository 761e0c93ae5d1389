//! Integration tests for top-level CLI behavior.

use std::process::Command;

/// Runs the binary with a scrubbed board environment so the tests are
/// independent of the developer's `.env` and shell.
fn run_taskdeck(args: &[&str], extra_env: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_taskdeck");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(std::env::temp_dir())
        .env_remove("BOARD_API_URL")
        .env_remove("BOARD_PROJECT_ID")
        .env_remove("BOARD_API_TOKEN")
        .env_remove("BOARD_ROLE");
    for (name, value) in extra_env {
        command.env(name, value);
    }
    command.output().expect("failed to run taskdeck binary")
}

#[test]
fn no_arguments_shows_usage() {
    let output = run_taskdeck(&[], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Usage"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = run_taskdeck(&["unknown"], &[]);
    assert!(!output.status.success());
}

#[test]
fn board_without_configuration_names_the_missing_variable() {
    let output = run_taskdeck(&["board"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("BOARD_API_URL"));
}

#[test]
fn member_role_is_not_offered_mutations() {
    let output = run_taskdeck(
        &["rm", "t1", "--yes"],
        &[
            ("BOARD_API_URL", "http://localhost:9"),
            ("BOARD_PROJECT_ID", "p1"),
            ("BOARD_ROLE", "MEMBER"),
        ],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("role"));
}

#[test]
fn rm_help_mentions_the_confirmation_skip() {
    let output = run_taskdeck(&["rm", "--help"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--yes"));
}

#[test]
fn move_rejects_unknown_status_values() {
    let output = run_taskdeck(&["move", "t1", "archived"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("in-progress"));
}
