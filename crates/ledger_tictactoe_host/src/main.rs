//! Ledger tic-tac-toe host CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use ledger_tictactoe::{GameEngine, GameRecord, Pubkey};
use ledger_tictactoe_host::{HostConfig, MatchScript, logging, run_script};
use std::path::Path;
use tracing::{info, instrument};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HostConfig::from_file(path)?,
        None => HostConfig::default(),
    };
    logging::init(config.log_filter());

    match cli.command {
        Command::Run { script, json } => run(&config, &script, json),
        Command::Layout => layout(),
    }
}

/// Replay a script and print the boards.
#[instrument(skip(config))]
fn run(config: &HostConfig, script: &Path, json: bool) -> Result<()> {
    let script = MatchScript::from_file(script)?;
    let report = run_script(config, &script)?;
    info!(game = %report.game(), "Replay complete");

    for (ply, record) in report.snapshots().iter().enumerate() {
        println!("ply {} (turn {})", ply + 1, record.turn());
        println!("{}\n", record.board());
    }
    for rejection in report.rejections() {
        println!(
            "move {} rejected: {} ({})",
            rejection.index + 1,
            rejection.name,
            rejection.code
        );
    }
    println!("state: {:?}", report.record().state());

    if json {
        println!("{}", report.record().to_json()?);
    }
    Ok(())
}

/// Print the encoded layout of an empty game.
#[instrument]
fn layout() -> Result<()> {
    let record = GameEngine::setup_game(Pubkey::new_unique(), Pubkey::new_unique());
    let hex: String = record
        .to_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    println!("record size: {} bytes", GameRecord::LEN);
    println!("{}", hex);
    Ok(())
}
