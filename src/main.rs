//! Rigger CLI - build and test task runner
//!
//! Usage: rigger <COMMAND>
//!
//! Commands:
//!   clean       Remove build output
//!   shrinkwrap  Regenerate and sanitize npm-shrinkwrap.json
//!   test        Run test suites, with the dependency process when needed
//!   build       Clean, then run every test suite
//!   watch       Run test suites, then rerun them on every change
//!   fix-crlf    Strip carriage returns from files

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use rigger::RiggerError;

use cli::{Cli, Commands};
use commands::{Context, ShrinkwrapArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(&cli)?;

    match cli.command {
        Commands::Clean { dry_run } => commands::cmd_clean(&ctx, dry_run),
        Commands::Shrinkwrap {
            existing,
            format,
            dev,
            file,
            npm,
        } => commands::cmd_shrinkwrap(
            &ctx,
            ShrinkwrapArgs {
                existing,
                format,
                dev,
                file,
                npm,
            },
        ),
        Commands::Test { suites } => commands::cmd_test(&ctx, &suites),
        Commands::Build => commands::cmd_build(&ctx),
        Commands::Watch { suites } => commands::cmd_watch(&ctx, &suites),
        Commands::FixCrlf { files } => commands::cmd_fix_crlf(&ctx, &files),
    }
}

/// Package manager failures exit with the manager's own code
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RiggerError>()
        .map_or(1, RiggerError::exit_code)
}
