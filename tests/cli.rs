use std::{
    path::PathBuf,
    process::{Command, Output},
};

fn fixtures() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn hina(args: &[&str], file: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hina"))
        .current_dir(fixtures())
        .args(args)
        .arg(file)
        .env_remove("HINA_MAX_DEPTH")
        .env_remove("HINA_LOG")
        .output()
        .expect("failed to run hina")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn runs_fibonacci_fixture() {
    let output = hina(&[], "fib.json");
    assert!(output.status.success(), "hina failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "fib: 610\n");
}

#[test]
fn prints_tuples_and_projections() {
    let output = hina(&[], "tuple.json");
    assert!(output.status.success(), "hina failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "(1, two)\ntwo\n");
}

#[test]
fn runtime_error_exits_non_zero_after_partial_output() {
    let output = hina(&[], "division_by_zero.json");
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "before\n");
    assert!(
        stderr(&output).contains("Division by zero"),
        "unexpected stderr: {}",
        stderr(&output)
    );
}

#[test]
fn build_error_names_the_unknown_kind() {
    let output = hina(&[], "unknown_kind.json");
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(
        stderr(&output).contains("While"),
        "unexpected stderr: {}",
        stderr(&output)
    );
}

#[test]
fn check_mode_builds_without_running() {
    let output = hina(&["--check"], "fib.json");
    assert!(output.status.success(), "hina failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "");

    let output = hina(&["--check"], "unknown_kind.json");
    assert!(!output.status.success());
}

#[test]
fn max_depth_stops_runaway_recursion() {
    let output = hina(&["--max-depth", "50"], "loop.json");
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("limit of 50"),
        "unexpected stderr: {}",
        stderr(&output)
    );
}

#[test]
fn rejects_files_that_are_not_json() {
    let output = hina(&[], "not_a_tree.txt");
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("not a .json tree"),
        "unexpected stderr: {}",
        stderr(&output)
    );
}
