//! Integration tests for dependency process orchestration with real children.

#![cfg(unix)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rigger::infrastructure::process::DependencyProcess;
use rigger::infrastructure::process::DependencyState;
use rigger::{run_with_dependency, Notifier, ProcessError, SpawnSpec};
use tempfile::tempdir;

#[derive(Default)]
struct Recorder(Mutex<Vec<(String, String)>>);

impl Recorder {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Notifier for Recorder {
    fn notify(&self, title: &str, message: &str) {
        self.0
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

#[derive(Debug)]
enum Failure {
    Work(&'static str),
    Process(ProcessError),
}

impl From<ProcessError> for Failure {
    fn from(e: ProcessError) -> Self {
        Failure::Process(e)
    }
}

/// Signals readiness, then logs every control line until `"close"`
const SERVER: &str = r#"
printf '"booting"\n' >&3
echo "not json" >&3
printf '"started"\n' >&3
while IFS= read -r line <&3; do
  echo "$line" >> control.log
  [ "$line" = '"close"' ] && exit 0
done
"#;

fn stub(dir: &Path, body: &str) -> SpawnSpec {
    std::fs::write(dir.join("stub.sh"), body).unwrap();
    SpawnSpec::new("db", "sh")
        .args(["stub.sh"])
        .working_dir(dir)
}

fn wait_for_log(dir: &Path, needle: &str) -> String {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let log = std::fs::read_to_string(dir.join("control.log")).unwrap_or_default();
        if log.contains(needle) || Instant::now() > deadline {
            return log;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn work_runs_once_after_ready_and_close_is_sent_once() {
    let dir = tempdir().unwrap();
    let spec = stub(dir.path(), SERVER);
    let notifier = Arc::new(Recorder::default());
    let mut calls = 0;

    let result: Result<&str, Failure> = run_with_dependency(Some(&spec), notifier.clone(), || {
        calls += 1;
        Ok("passed")
    });

    assert_eq!(result.unwrap(), "passed");
    assert_eq!(calls, 1);
    assert_eq!(notifier.messages()[0], "Starting...");
    let log = wait_for_log(dir.path(), "\"close\"");
    assert_eq!(log.lines().collect::<Vec<_>>(), vec!["\"close\""]);
}

#[test]
fn failing_work_still_closes_the_child() {
    let dir = tempdir().unwrap();
    let spec = stub(dir.path(), SERVER);

    let result: Result<(), Failure> =
        run_with_dependency(Some(&spec), Arc::new(Recorder::default()), || {
            Err(Failure::Work("tests failed"))
        });

    assert!(matches!(result, Err(Failure::Work("tests failed"))));
    let log = wait_for_log(dir.path(), "\"close\"");
    assert_eq!(log.matches("\"close\"").count(), 1);
}

#[test]
fn child_exiting_without_ready_fails_and_skips_work() {
    let dir = tempdir().unwrap();
    let spec = stub(dir.path(), "exit 1\n");
    let notifier = Arc::new(Recorder::default());
    let mut ran = false;

    let result: Result<(), Failure> = run_with_dependency(Some(&spec), notifier.clone(), || {
        ran = true;
        Ok(())
    });

    assert!(!ran);
    assert!(matches!(
        result,
        Err(Failure::Process(ProcessError::ExitedBeforeReady { .. }))
    ));
    assert!(notifier.messages().contains(&"Exited".to_string()));
}

#[test]
fn work_never_runs_before_started() {
    let dir = tempdir().unwrap();
    // Readiness is announced only after a marker file exists.
    let spec = stub(
        dir.path(),
        r#"
sleep 0.3
touch ready.marker
printf '"started"\n' >&3
read -r line <&3
"#,
    );

    let marker = dir.path().join("ready.marker");
    let result: Result<bool, Failure> =
        run_with_dependency(Some(&spec), Arc::new(Recorder::default()), || {
            Ok(marker.exists())
        });

    assert!(result.unwrap(), "work ran before the child signaled readiness");
}

#[test]
fn readiness_timeout_kills_a_silent_child() {
    let dir = tempdir().unwrap();
    let spec = stub(dir.path(), "sleep 30\n").ready_timeout(Duration::from_secs(1));
    let mut process = DependencyProcess::new(spec, Arc::new(Recorder::default()));
    let started = Instant::now();

    let result: Result<(), Failure> = process.run(|| Ok(()));

    assert!(matches!(
        result,
        Err(Failure::Process(ProcessError::ReadyTimeout { seconds: 1, .. }))
    ));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(process.state(), DependencyState::Errored);
}

#[test]
fn missing_executable_is_a_spawn_failure() {
    let spec = SpawnSpec::new("db", "rigger-no-such-binary");
    let notifier = Arc::new(Recorder::default());

    let result: Result<(), Failure> = run_with_dependency(Some(&spec), notifier.clone(), || Ok(()));

    assert!(matches!(
        result,
        Err(Failure::Process(ProcessError::SpawnFailed { .. }))
    ));
    assert!(notifier.messages().iter().any(|m| m.starts_with("Error: ")));
}

#[test]
fn no_spec_runs_work_directly() {
    let mut calls = 0;

    let result: Result<u8, Failure> = run_with_dependency(None, Arc::new(Recorder::default()), || {
        calls += 1;
        Ok(7)
    });

    assert_eq!(result.unwrap(), 7);
    assert_eq!(calls, 1);
}

#[test]
fn largest_configurable_timeout_still_runs_work() {
    let dir = tempdir().unwrap();
    let mut spec = stub(dir.path(), SERVER);
    spec.ready_timeout_secs = Some(i64::MAX as u64);
    let notifier = Arc::new(Recorder::default());

    let result: Result<&str, Failure> =
        run_with_dependency(Some(&spec), notifier.clone(), || Ok("passed"));

    assert_eq!(result.unwrap(), "passed");
    let log = wait_for_log(dir.path(), "\"close\"");
    assert_eq!(log.matches("\"close\"").count(), 1);
}
