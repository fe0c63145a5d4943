use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lock_task_bridge::lock_task::PlatformKind;

/// Lock Task Bridge
///
/// Enters, exits and reports the single-task (kiosk) mode of an Android
/// device. Every outcome is reported as true or false.
#[derive(Parser, Debug)]
#[command(name = "lock-task-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured platform backend
    #[arg(short, long, value_enum, global = true)]
    pub platform: Option<PlatformKind>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enter lock task mode
    Start,
    /// Exit lock task mode
    Stop,
    /// Report whether lock task mode is active
    Status,
    /// Send a raw method call and print the JSON response
    Call {
        /// Method name, e.g. startLockTask
        method: String,
    },
    /// Answer line-delimited JSON calls on stdin until EOF
    Serve,
    /// Show the effective configuration
    ShowConfig,
}
