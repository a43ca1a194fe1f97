//! `league-sheets`: standings rosters and live scores into sheets
//!
//! ```text
//! league-sheets parse standings.pdf
//! league-sheets update standings.pdf --config league.toml
//! league-sheets merge-scores scraped_data.json
//! ```

mod commands;
mod config;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{MergeArgs, ParseArgs, UpdateArgs};
use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "league-sheets", version, about)]
struct Opts {
    /// TOML configuration; built-in defaults are used when omitted
    #[arg(long, global = true, env = "LEAGUE_SHEETS_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a standings document and print the roster
    Parse(ParseArgs),
    /// Parse a standings document and write the roster into the workbook
    Update(UpdateArgs),
    /// Merge scraped game scores into the score sheet
    MergeScores(MergeArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let config = AppConfig::load(opts.config.as_deref())?;
    let mut out = io::stdout().lock();

    match &opts.command {
        Command::Parse(args) => commands::parse(&config, args, &mut out),
        Command::Update(args) => commands::update(&config, args, &mut out),
        Command::MergeScores(args) => commands::merge(&config, args, &mut out),
    }
}
