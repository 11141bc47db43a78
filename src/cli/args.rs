//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Draws lightning between your fingertips over a live webcam feed
#[derive(Parser, Debug)]
#[command(name = "finger-lightning")]
#[command(version, about = "Webcam hand tracking with fingertip lightning", long_about = None)]
#[command(after_help = "Press q in the window to quit.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras); overrides the config file
    #[arg(long)]
    pub camera: Option<u32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
