//! Watch command handler

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::info;

use rigger::application::select_suites;
use rigger::watcher::{watch, WatchEvent, WatchOptions};

use super::test::test_use_case;
use super::Context;

pub fn cmd_watch(ctx: &Context, requested: &[String]) -> Result<()> {
    let suites = select_suites(&ctx.config.suites, requested)?;
    if suites.is_empty() {
        println!("No test suites configured");
        return Ok(());
    }

    let needs_dependency = ctx
        .config
        .needs_dependency(suites.iter().map(String::as_str));
    let use_case = test_use_case(ctx);
    let options = WatchOptions::from_config(ctx.project_root(), &ctx.config.watch);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    watch(
        &options,
        running,
        ctx.notifier.clone(),
        || use_case.execute(&suites, needs_dependency),
        log_event,
    )?;
    Ok(())
}

fn log_event(event: WatchEvent) {
    match event {
        WatchEvent::WatchStarted { paths } => {
            let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
            info!("watching {} (Ctrl+C to stop)", paths.join(", "));
        }
        WatchEvent::FileChanged { path } => info!(path = %path.display(), "file changed"),
        WatchEvent::RunStarted => info!("running tests"),
        WatchEvent::RunComplete => info!("tests passed; waiting for changes"),
        WatchEvent::RunFailed { message } => info!(%message, "tests failed; waiting for changes"),
        WatchEvent::Shutdown => info!("stopped watching"),
    }
}
