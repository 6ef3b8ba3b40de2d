//! Gated runs against a dependency process
//!
//! `Idle → Starting → Ready → Running → Closing → Done`, with `Errored`
//! reachable from `Starting` (the child never became ready) and `Running`
//! (the work failed; `"close"` is still sent).

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::control::{ControlMessage, ControlWriter};
use super::error::ProcessError;
use super::spawn::{self, ChildEvent, ChildLink};
use crate::domain::ports::Notifier;
use crate::domain::value_objects::SpawnSpec;

/// How long to keep reading the control channel after the child exited, so a
/// `"started"` written just before exiting is not lost to thread ordering.
const EXIT_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Lifecycle of one gated run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    Idle,
    Starting,
    Ready,
    Running,
    Closing,
    Done,
    Errored,
}

/// Run `work`, gated on the dependency process described by `spec`.
///
/// Without a spec, `work` runs directly: nothing is spawned and no messages
/// are exchanged.
pub fn run_with_dependency<T, E, F>(
    spec: Option<&SpawnSpec>,
    notifier: Arc<dyn Notifier>,
    work: F,
) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<ProcessError>,
{
    match spec {
        None => work(),
        Some(spec) => DependencyProcess::new(spec.clone(), notifier).run(work),
    }
}

/// One auxiliary process and the work gated on it
pub struct DependencyProcess {
    spec: SpawnSpec,
    notifier: Arc<dyn Notifier>,
    state: DependencyState,
}

impl DependencyProcess {
    pub fn new(spec: SpawnSpec, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            spec,
            notifier,
            state: DependencyState::Idle,
        }
    }

    pub fn state(&self) -> DependencyState {
        self.state
    }

    pub fn spec(&self) -> &SpawnSpec {
        &self.spec
    }

    /// Spawn the process, wait for readiness, run `work`, send `"close"`.
    ///
    /// `work` runs at most once and never before `"started"` arrived.
    pub fn run<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<ProcessError>,
    {
        self.transition(DependencyState::Starting);
        self.notifier.notify(&self.spec.name, "Starting...");

        let link = match spawn::spawn_with_control(&self.spec, self.notifier.clone()) {
            Ok(link) => link,
            Err(e) => {
                self.transition(DependencyState::Errored);
                return Err(e.into());
            }
        };

        self.gate(link, work)
    }

    /// Everything after a successful spawn
    fn gate<T, E, F>(&mut self, link: ChildLink, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<ProcessError>,
    {
        let ChildLink {
            control,
            events,
            pid,
        } = link;
        let mut running = RunningDependency::new(self.spec.name.clone(), control);

        if let Err(e) = await_ready(&events, &self.spec.name, self.spec.ready_timeout_duration())
        {
            self.transition(DependencyState::Errored);
            if matches!(e, ProcessError::ReadyTimeout { .. }) {
                running.close();
                if let Some(pid) = pid {
                    spawn::kill(pid);
                }
            } else {
                // Nobody is listening any more.
                running.disarm();
            }
            return Err(e.into());
        }
        self.transition(DependencyState::Ready);

        self.transition(DependencyState::Running);
        let result = work();

        self.transition(DependencyState::Closing);
        running.close();

        match &result {
            Ok(_) => self.transition(DependencyState::Done),
            Err(_) => self.transition(DependencyState::Errored),
        }
        result
    }

    fn transition(&mut self, next: DependencyState) {
        debug!(name = %self.spec.name, from = ?self.state, to = ?next, "dependency process state");
        self.state = next;
    }
}

/// Block until the child signals readiness, exits, or the timeout expires.
fn await_ready(
    events: &Receiver<ChildEvent>,
    name: &str,
    timeout: Option<Duration>,
) -> Result<(), ProcessError> {
    // A bound past the end of the clock is no bound at all.
    let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
    let exited_before_ready = |status: String| ProcessError::ExitedBeforeReady {
        name: name.to_string(),
        status,
    };

    loop {
        let event = match deadline {
            None => events.recv().ok(),
            Some(deadline) => {
                match events.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(event) => Some(event),
                    Err(RecvTimeoutError::Disconnected) => None,
                    Err(RecvTimeoutError::Timeout) => {
                        return Err(ProcessError::ReadyTimeout {
                            name: name.to_string(),
                            seconds: timeout.unwrap_or_default().as_secs(),
                        })
                    }
                }
            }
        };

        match event {
            Some(ChildEvent::Message(ControlMessage::Started)) => return Ok(()),
            Some(ChildEvent::Message(other)) => {
                debug!(name, message = ?other, "ignoring control message before readiness");
            }
            Some(ChildEvent::ChannelClosed) => {
                debug!(name, "control channel closed before readiness");
            }
            Some(ChildEvent::Exited(status)) => {
                return if drain_for_started(events) {
                    Ok(())
                } else {
                    Err(exited_before_ready(status))
                };
            }
            Some(ChildEvent::WaitFailed(reason)) => {
                return Err(ProcessError::Crashed {
                    name: name.to_string(),
                    reason,
                })
            }
            None => return Err(exited_before_ready("event stream ended".to_string())),
        }
    }
}

/// After an exit, look for a `"started"` the reader thread has not delivered yet.
fn drain_for_started(events: &Receiver<ChildEvent>) -> bool {
    let deadline = Instant::now() + EXIT_DRAIN_GRACE;
    loop {
        match events.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(ChildEvent::Message(ControlMessage::Started)) => return true,
            Ok(ChildEvent::ChannelClosed) | Err(_) => return false,
            Ok(_) => continue,
        }
    }
}

/// Handle to a dependency process that reached readiness.
///
/// Sends `"close"` exactly once: explicitly via [`close`](Self::close), or on
/// drop when the work unwinds.
pub struct RunningDependency {
    name: String,
    control: Box<dyn ControlWriter>,
    closed: bool,
}

impl RunningDependency {
    pub fn new(name: impl Into<String>, control: Box<dyn ControlWriter>) -> Self {
        Self {
            name: name.into(),
            control,
            closed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ask the child to shut down. Does not wait for it to exit.
    pub fn close(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }

        let sent = ControlMessage::Close
            .write_to(&mut self.control)
            .and_then(|()| self.control.finish());
        match sent {
            Ok(()) => debug!(name = %self.name, "sent close to dependency process"),
            Err(e) => {
                warn!(name = %self.name, error = %e, "failed to send close to dependency process")
            }
        }
    }

    /// Forget the child without messaging it (it is already gone)
    fn disarm(&mut self) {
        self.closed = true;
    }
}

impl Drop for RunningDependency {
    fn drop(&mut self) {
        self.close();
    }
}
