//! CLI argument parsing for spinlog

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about = "Buffered background log writer", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pipe stdin through the writer into the log file
    Pipe {
        /// Destination file (defaults to the configured log path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Hammer the writer from concurrent producers and report drops
    Stress {
        /// Destination file (defaults to the configured log path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of producer threads
        #[arg(short, long, default_value = "4")]
        producers: usize,

        /// Lines appended per producer
        #[arg(short, long, default_value = "1000")]
        lines: usize,
    },
}
