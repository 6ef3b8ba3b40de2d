use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rigger - build and test task runner
#[derive(Parser, Debug)]
#[command(name = "rigger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Turn off notifications of success and failure
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Project root (default: current directory)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Config file (default: <project>/rigger.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove build output
    Clean {
        /// Show what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Regenerate and sanitize npm-shrinkwrap.json
    Shrinkwrap {
        /// Keep the installed node_modules tree
        #[arg(long)]
        existing: bool,

        /// Only format the existing artifact; do not reinstall
        #[arg(long)]
        format: bool,

        /// Include development dependencies
        #[arg(long)]
        dev: bool,

        /// Lock artifact to write
        #[arg(long)]
        file: Option<PathBuf>,

        /// Package manager executable
        #[arg(long)]
        npm: Option<String>,
    },

    /// Run test suites, with the dependency process when a suite needs it
    Test {
        /// Suites to run (default: all configured suites)
        suites: Vec<String>,
    },

    /// Clean, then run every test suite
    Build,

    /// Run test suites, then rerun them whenever a watched file changes
    Watch {
        /// Suites to run (default: all configured suites)
        suites: Vec<String>,
    },

    /// Strip carriage returns from files
    FixCrlf {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
