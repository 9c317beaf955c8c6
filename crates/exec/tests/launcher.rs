//! Launcher and end-to-end compiler tests against real processes.
//!
//! Unix only: the tests drive `/bin/sh` as a stand-in compiler.

#![cfg(unix)]

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use compile::{
    CommandLineCompileSpec, CompileError, CompileSpec, Compiler, FailureKind, JavaCompileSpec,
    ProcessDescription, ProcessLauncher, ResolvedExecutable,
};
use exec::{command_line_compiler, StdProcessLauncher};

fn sh(script: &str, dir: &Path, ignore_exit_value: bool) -> ProcessDescription {
    let executable = ResolvedExecutable::new("/bin/sh").unwrap();
    let mut builder = ProcessDescription::builder(executable, dir);
    builder
        .arg("-c")
        .arg(script)
        .ignore_exit_value(ignore_exit_value);
    builder.build()
}

#[test]
fn zero_exit_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = StdProcessLauncher::new()
        .launch(&sh("exit 0", dir.path(), true))
        .unwrap();

    assert_eq!(outcome.exit_status, 0);
    assert!(outcome.finished_at >= outcome.started_at);
}

#[test]
fn non_zero_exit_is_an_outcome_when_ignored() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = StdProcessLauncher::new()
        .launch(&sh("exit 3", dir.path(), true))
        .unwrap();

    assert_eq!(outcome.exit_status, 3);
}

#[test]
fn non_zero_exit_is_a_launch_error_when_not_ignored() {
    let dir = tempfile::tempdir().unwrap();

    let err = StdProcessLauncher::new()
        .launch(&sh("exit 3", dir.path(), false))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("exit status 3"));
    assert!(message.starts_with("Compiler process '/bin/sh' failed"));
}

#[test]
fn output_streams_are_captured() {
    let dir = tempfile::tempdir().unwrap();
    let script = "echo out; echo 'A.java:1: error' >&2; exit 1";

    let outcome = StdProcessLauncher::new()
        .launch(&sh(script, dir.path(), true))
        .unwrap();

    assert_eq!(outcome.stdout, "out\n");
    assert_eq!(outcome.stderr, "A.java:1: error\n");
}

#[test]
fn returns_once_the_process_exits_even_if_a_child_holds_the_pipes() {
    let dir = tempfile::tempdir().unwrap();
    let started = Instant::now();

    let outcome = StdProcessLauncher::new()
        .launch(&sh("echo started; sleep 4 & exit 1", dir.path(), true))
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(outcome.exit_status, 1);
    assert_eq!(outcome.stdout, "started\n");
}

#[test]
fn drain_timeout_bounds_the_wait_after_exit() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = StdProcessLauncher::new().with_drain_timeout(Duration::from_millis(50));
    let started = Instant::now();

    let outcome = launcher
        .launch(&sh("sleep 4 & exit 0", dir.path(), true))
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(outcome.exit_status, 0);
}

#[test]
fn process_runs_in_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = StdProcessLauncher::new()
        .launch(&sh("pwd -P", dir.path(), true))
        .unwrap();

    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(Path::new(outcome.stdout.trim_end()), expected);
}

#[test]
fn signal_termination_maps_to_shell_convention() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = StdProcessLauncher::new()
        .launch(&sh("kill -9 $$", dir.path(), true))
        .unwrap();

    assert_eq!(outcome.exit_status, 128 + 9);
}

#[test]
fn missing_executable_is_an_invocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-javac");
    let executable = ResolvedExecutable::new(&missing).unwrap();
    let description = ProcessDescription::builder(executable, dir.path()).build();

    let err = StdProcessLauncher::new().launch(&description).unwrap_err();

    assert_eq!(err.io_error().kind(), io::ErrorKind::NotFound);
    assert_eq!(err.executable().as_path(), missing);
}

#[test]
fn missing_working_directory_is_an_invocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent");

    let result = StdProcessLauncher::new().launch(&sh("exit 0", &absent, true));

    assert!(result.is_err());
}

// ============================================================================
// End to end
// ============================================================================

/// A command-line spec that runs `/bin/sh -c <script> <sources...>`.
///
/// With no fork options, classpath, or destination, the generated javac
/// command line is just the compiler args followed by the sources, so the
/// sources arrive in the script as `$0`, `$1`, ...
fn shell_compile_spec(dir: &Path, script: &str, sources: &[&str]) -> CompileSpec {
    let mut java = JavaCompileSpec::new(dir);
    java.compiler_args = vec!["-c".into(), script.into()];
    java.source_files = sources.iter().map(Into::into).collect();
    CompileSpec::CommandLine(CommandLineCompileSpec {
        executable: ResolvedExecutable::new("/bin/sh").unwrap(),
        spec: java,
    })
}

#[test]
fn successful_compile_did_work() {
    let dir = tempfile::tempdir().unwrap();
    let script = r#"echo "$0 $1" > compiled.txt"#;
    let spec = shell_compile_spec(dir.path(), script, &["A.java", "B.java"]);

    let result = command_line_compiler().execute(&spec).unwrap();

    assert!(result.did_work());
    let compiled = std::fs::read_to_string(dir.path().join("compiled.txt")).unwrap();
    assert_eq!(compiled, "A.java B.java\n");
}

#[test]
fn non_ascii_source_paths_reach_the_compiler_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let script = r#"printf '%s' "$0" > compiled.txt"#;
    let spec = shell_compile_spec(dir.path(), script, &["src/Café漢字.java"]);

    command_line_compiler().execute(&spec).unwrap();

    let compiled = std::fs::read_to_string(dir.path().join("compiled.txt")).unwrap();
    assert_eq!(compiled, "src/Café漢字.java");
}

#[test]
fn failed_compile_reports_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let script = "echo 'error: cannot find symbol' >&2; exit 1";
    let spec = shell_compile_spec(dir.path(), script, &[]);

    let err = command_line_compiler().execute(&spec).unwrap_err();

    assert!(matches!(err, CompileError::Compilation(_)));
    assert_eq!(err.exit_status(), Some(1));
    assert_eq!(err.report().kind, FailureKind::Compilation);
}

#[test]
fn java_home_without_compiler_is_an_invocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut java = JavaCompileSpec::new(dir.path());
    java.fork_options.java_home = Some(dir.path().join("jdk"));
    java.fork_options.executable = Some("/bin/sh".into());

    let err = command_line_compiler()
        .execute(&CompileSpec::Generic(java))
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Invocation);
    match err {
        CompileError::Invocation(failure) => {
            let expected = dir.path().join("jdk/bin/javac");
            assert_eq!(failure.executable().as_path(), expected);
        }
        other => panic!("expected invocation failure, got {other:?}"),
    }
}
