//! Spawning a child with a control channel
//!
//! The child end of a socket pair is moved to `CONTROL_FD` between fork and
//! exec. Two helper threads watch the child: one decodes control messages,
//! the other reaps the process and reports its exit.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use super::control::{ControlMessage, ControlWriter};
use super::error::ProcessError;
use crate::domain::ports::Notifier;
use crate::domain::value_objects::SpawnSpec;

/// Something that happened to the child, in arrival order
#[derive(Debug)]
pub(crate) enum ChildEvent {
    Message(ControlMessage),
    /// The child end of the control channel is closed
    ChannelClosed,
    /// The child exited; carries the rendered exit status
    Exited(String),
    /// Waiting on the child failed
    WaitFailed(String),
}

/// Parent-side handles to a freshly spawned child
pub(crate) struct ChildLink {
    pub control: Box<dyn ControlWriter>,
    pub events: Receiver<ChildEvent>,
    pub pid: Option<u32>,
}

impl ChildLink {
    /// Build a link from parts (tests drive the protocol without a process)
    #[cfg(test)]
    pub fn detached(control: Box<dyn ControlWriter>, events: Receiver<ChildEvent>) -> Self {
        Self {
            control,
            events,
            pid: None,
        }
    }
}

#[cfg(unix)]
pub(crate) fn spawn_with_control(
    spec: &SpawnSpec,
    notifier: Arc<dyn Notifier>,
) -> Result<ChildLink, ProcessError> {
    use std::io::{BufRead, BufReader};
    use std::os::fd::AsRawFd;
    use std::os::unix::net::UnixStream;
    use std::os::unix::process::CommandExt;
    use std::process::{Command, Stdio};
    use std::sync::mpsc;
    use std::thread;

    use tracing::debug;

    use super::control::{CONTROL_FD, CONTROL_FD_ENV};

    let name = spec.name.clone();
    let spawn_failed = |source: std::io::Error| ProcessError::SpawnFailed {
        name: name.clone(),
        source,
    };

    let (parent, child_end) = UnixStream::pair().map_err(spawn_failed)?;
    let child_fd = child_end.as_raw_fd();

    let mut command = Command::new(&spec.command);
    command
        .args(&spec.args)
        .env(CONTROL_FD_ENV, CONTROL_FD.to_string())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    // SAFETY: the hook runs between fork and exec and only calls dup2/fcntl,
    // both async-signal-safe.
    unsafe {
        command.pre_exec(move || install_control_fd(child_fd));
    }

    let child = command.spawn().map_err(|source| {
        notifier.notify(&spec.name, &format!("Error: {source}"));
        spawn_failed(source)
    })?;
    drop(child_end);

    let pid = child.id();
    debug!(name = %spec.name, pid, "dependency process spawned");

    let reader = match parent.try_clone() {
        Ok(reader) => reader,
        Err(e) => {
            kill(pid);
            return Err(spawn_failed(e));
        }
    };

    let (tx, rx) = mpsc::channel();

    let reader_tx = tx.clone();
    let reader_thread = thread::Builder::new()
        .name(format!("rigger-control-{}", spec.name))
        .spawn(move || {
            for line in BufReader::new(reader).lines() {
                let Ok(line) = line else { break };
                if let Some(message) = ControlMessage::decode(&line) {
                    // Keep draining after the receiver is gone so the child
                    // never blocks on a full socket buffer.
                    let _ = reader_tx.send(ChildEvent::Message(message));
                }
            }
            let _ = reader_tx.send(ChildEvent::ChannelClosed);
        });
    if let Err(e) = reader_thread {
        kill(pid);
        return Err(spawn_failed(e));
    }

    let waiter_name = spec.name.clone();
    let waiter = thread::Builder::new()
        .name(format!("rigger-wait-{}", spec.name))
        .spawn(move || reap(child, &waiter_name, notifier.as_ref(), &tx));
    if let Err(e) = waiter {
        kill(pid);
        return Err(spawn_failed(e));
    }

    Ok(ChildLink {
        control: Box::new(parent),
        events: rx,
        pid: Some(pid),
    })
}

#[cfg(unix)]
fn install_control_fd(fd: std::os::fd::RawFd) -> std::io::Result<()> {
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};
    use nix::unistd::dup2;

    use super::control::CONTROL_FD;

    if fd == CONTROL_FD {
        // Already in place; only the close-on-exec flag has to go.
        fcntl(fd, FcntlArg::F_SETFD(FdFlag::empty()))?;
    } else {
        dup2(fd, CONTROL_FD)?;
    }
    Ok(())
}

#[cfg(unix)]
fn reap(
    mut child: std::process::Child,
    name: &str,
    notifier: &dyn Notifier,
    events: &Sender<ChildEvent>,
) {
    match child.wait() {
        Ok(status) => {
            notifier.notify(name, "Exited");
            let _ = events.send(ChildEvent::Exited(status.to_string()));
        }
        Err(e) => {
            notifier.notify(name, &format!("Error: {e}"));
            let _ = events.send(ChildEvent::WaitFailed(e.to_string()));
        }
    }
}

/// Forcefully terminate a child that never became ready
#[cfg(unix)]
pub(crate) fn kill(pid: u32) {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    if let Err(e) = signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        tracing::debug!(pid, error = %e, "failed to kill dependency process");
    }
}

#[cfg(not(unix))]
pub(crate) fn spawn_with_control(
    _spec: &SpawnSpec,
    _notifier: Arc<dyn Notifier>,
) -> Result<ChildLink, ProcessError> {
    Err(ProcessError::Unsupported)
}

#[cfg(not(unix))]
pub(crate) fn kill(_pid: u32) {}
