//! The watch loop

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::domain::ports::Notifier;
use crate::error::{RiggerError, RiggerResult};

use super::event::{WatchEvent, WatchOptions, WatcherState};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// notify reports existing files right after registration; those are dropped.
const STARTUP_COOLDOWN: Duration = Duration::from_millis(500);

/// Run `rerun` once, then again after every settled burst of changes.
///
/// Each changed path is announced as `Changed: <path>` / `Running tests...`
/// before the rerun. A failing run is reported and watching continues.
/// Returns once `running` is cleared.
pub fn watch<F>(
    options: &WatchOptions,
    running: Arc<AtomicBool>,
    notifier: Arc<dyn Notifier>,
    mut rerun: F,
    event_callback: impl Fn(WatchEvent),
) -> RiggerResult<()>
where
    F: FnMut() -> RiggerResult<()>,
{
    let paths = options.resolved_paths();
    event_callback(WatchEvent::WatchStarted {
        paths: paths.clone(),
    });

    run_once(&mut rerun, &event_callback);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) if is_content_change(&event.kind) => {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "file watcher error"),
        },
        Config::default(),
    )
    .map_err(|source| RiggerError::Watch {
        path: options.project_root.clone(),
        source,
    })?;

    let watched = register(&mut watcher, &paths)?;
    if watched == 0 {
        return Err(RiggerError::Watch {
            path: paths.first().cloned().unwrap_or_else(|| options.project_root.clone()),
            source: notify::Error::path_not_found(),
        });
    }

    let cooldown_end = Instant::now() + STARTUP_COOLDOWN;
    while running.load(Ordering::SeqCst) && Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(POLL_INTERVAL);
    }

    let mut state = WatcherState::new(options.debounce);
    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(POLL_INTERVAL) {
            state.add_change(path);
        }

        if state.should_run() {
            for path in state.take_changes() {
                notifier.notify(&format!("Changed: {}", path.display()), "Running tests...");
                event_callback(WatchEvent::FileChanged { path });
            }
            run_once(&mut rerun, &event_callback);
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// Watch every existing path; missing ones are skipped
fn register(watcher: &mut RecommendedWatcher, paths: &[PathBuf]) -> RiggerResult<usize> {
    let mut watched = 0;
    for path in paths {
        if !path.exists() {
            debug!(path = %path.display(), "skipping missing watch path");
            continue;
        }
        watcher
            .watch(path, RecursiveMode::Recursive)
            .map_err(|source| RiggerError::Watch {
                path: path.clone(),
                source,
            })?;
        watched += 1;
    }
    Ok(watched)
}

fn is_content_change(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}

fn run_once<F>(rerun: &mut F, event_callback: &impl Fn(WatchEvent))
where
    F: FnMut() -> RiggerResult<()>,
{
    event_callback(WatchEvent::RunStarted);
    match rerun() {
        Ok(()) => event_callback(WatchEvent::RunComplete),
        Err(e) => {
            warn!(error = %e, "test run failed; still watching");
            event_callback(WatchEvent::RunFailed {
                message: e.to_string(),
            });
        }
    }
}
