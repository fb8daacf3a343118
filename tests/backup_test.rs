//! Backup behavior: the copy, the git invocations, and working-directory
//! restoration on every exit path.

use std::fs;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use chrono::{Local, TimeZone};
use tempfile::TempDir;

use rsubmit::errors::LaunchError;
use rsubmit::infrastructure::traits::CommandRunner;
use rsubmit::launcher::backup;

// The backup changes the process-global working directory; serialize the
// tests in this file around it.
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> std::sync::MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// Records every git invocation; optionally fails the given subcommand.
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    fail_subcommand: Option<&'static str>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.calls
            .lock()
            .unwrap()
            .push((cmd.to_string(), args.iter().map(|s| s.to_string()).collect()));

        let failing = self
            .fail_subcommand
            .is_some_and(|sub| args.first() == Some(&sub));
        Ok(Output {
            status: exit_status(if failing { 1 } else { 0 }),
            stdout: vec![],
            stderr: vec![],
        })
    }

    fn status(&self, cmd: &str, args: &[&str]) -> io::Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push((cmd.to_string(), args.iter().map(|s| s.to_string()).collect()));
        Ok(0)
    }
}

#[test]
fn given_index_file_when_backed_up_then_copy_and_timestamped_commit_exist() {
    let _guard = lock();
    let index_dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    let index_file = index_dir.path().join("r1.json");
    fs::write(&index_file, r#"{"protocols": {}}"#).unwrap();

    let runner = RecordingRunner::default();
    let ts = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    backup::run(&index_file, backup_dir.path(), &runner, ts).unwrap();

    let copy = backup_dir.path().join("r1.json");
    assert_eq!(
        fs::read_to_string(&copy).unwrap(),
        r#"{"protocols": {}}"#,
        "backup dir should contain an identical copy"
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("git".to_string(), vec!["add".to_string(), "-A".to_string()]));
    assert_eq!(
        calls[1],
        (
            "git".to_string(),
            vec![
                "commit".to_string(),
                "-m".to_string(),
                "index backup 2024-05-01 12:00:00".to_string()
            ]
        )
    );
}

#[test]
fn given_backup_when_finished_then_previous_directory_is_restored() {
    let _guard = lock();
    let index_dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    let index_file = index_dir.path().join("ltp.json");
    fs::write(&index_file, "{}").unwrap();

    let before = std::env::current_dir().unwrap();
    let runner = RecordingRunner::default();
    backup::run(&index_file, backup_dir.path(), &runner, Local::now()).unwrap();

    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn given_failing_commit_then_error_propagates_and_directory_is_restored() {
    let _guard = lock();
    let index_dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    let index_file = index_dir.path().join("ltp.json");
    fs::write(&index_file, "{}").unwrap();

    let before = std::env::current_dir().unwrap();
    let runner = RecordingRunner {
        fail_subcommand: Some("commit"),
        ..Default::default()
    };

    let err = backup::run(&index_file, backup_dir.path(), &runner, Local::now()).unwrap_err();

    match err {
        LaunchError::CommandFailed { command, status } => {
            assert!(command.starts_with("git commit"));
            assert_eq!(status, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(std::env::current_dir().unwrap(), before);
    // The partial copy is deliberately left in place
    assert!(backup_dir.path().join("ltp.json").exists());
}

#[test]
fn given_missing_index_file_then_backup_fails_without_side_effects() {
    let _guard = lock();
    let backup_dir = TempDir::new().unwrap();

    let runner = RecordingRunner::default();
    let err = backup::run(
        std::path::Path::new("/no/such/index.json"),
        backup_dir.path(),
        &runner,
        Local::now(),
    )
    .unwrap_err();

    assert!(matches!(err, LaunchError::IndexNotFound(_)));
    assert!(runner.calls().is_empty(), "git must not run");
    assert!(fs::read_dir(backup_dir.path()).unwrap().next().is_none());
}
