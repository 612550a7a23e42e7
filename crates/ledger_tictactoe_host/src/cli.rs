//! Command-line interface for the reference host.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ledger tic-tac-toe host - replay matches against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "ledger_tictactoe_host")]
#[command(about = "Reference host for account-backed tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a host configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a scripted match and print each accepted board
    Run {
        /// Path to the match script (TOML)
        script: PathBuf,

        /// Print the final record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the record layout size and an encoded empty game
    Layout,
}
