//! Subcommand implementations
//!
//! Each command reports to the given writer so the output can be checked in
//! tests; `main` passes stdout.

use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use clap::Args;
use log::{info, warn};
use roster_core::scores::read_entries;
use roster_core::{
    merge_scores, write_roster, Document, Preset, RosterParser, RosterReport, Workbook,
};

use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Standings document (.pdf, or text with form-feed page breaks)
    pub document: PathBuf,
    /// Parser preset, overriding the configuration file
    #[arg(long)]
    pub preset: Option<Preset>,
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Standings document (.pdf, or text with form-feed page breaks)
    pub document: PathBuf,
    #[arg(long)]
    pub preset: Option<Preset>,
    /// Workbook file, overriding the configuration file
    #[arg(long)]
    pub workbook: Option<PathBuf>,
    /// Target sheet, overriding the configuration file
    #[arg(long)]
    pub sheet: Option<String>,
    /// Leave the status cell alone
    #[arg(long)]
    pub no_stamp: bool,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// JSON list of `{name, scoresArray}` objects
    pub scores: PathBuf,
    #[arg(long)]
    pub workbook: Option<PathBuf>,
    #[arg(long)]
    pub sheet: Option<String>,
}

const RULE: &str = "--------------------";

fn parse_document(
    config: &AppConfig,
    path: &Path,
    preset: Option<Preset>,
) -> anyhow::Result<RosterReport> {
    let parser = RosterParser::new(config.parser.resolve(preset))?;
    let document = Document::open(path, &config.pdftotext)?;
    info!("Loaded {:?} ({} pages)", path, document.page_count());

    let report = parser.parse_document(&document);
    if !report.mismatches.is_empty() {
        warn!(
            "{} roster lines did not match and were dropped (RUST_LOG=debug lists them)",
            report.mismatches.len()
        );
    }
    Ok(report)
}

pub fn parse(config: &AppConfig, args: &ParseArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let report = parse_document(config, &args.document, args.preset)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for record in &report.records {
            writeln!(out, "{record}")?;
        }
    }
    Ok(())
}

pub fn update(config: &AppConfig, args: &UpdateArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let workbook_path = args.workbook.as_deref().unwrap_or(config.workbook.as_path());
    let sheet = args.sheet.as_deref().unwrap_or(&config.roster.sheet);

    // Open the target first so a bad path or sheet fails before parsing.
    let mut book = Workbook::load(workbook_path)?;
    book.sheet(sheet)?;

    let report = parse_document(config, &args.document, args.preset)?;
    if report.records.is_empty() {
        bail!(
            "No roster records found in {:?}; workbook left unchanged",
            args.document
        );
    }

    let stamp = (config.roster.stamp_status && !args.no_stamp).then(|| Local::now().naive_local());
    let written = write_roster(&mut book, sheet, &report.records, &config.roster.layout, stamp)?;
    book.save(workbook_path)
        .with_context(|| format!("While saving {workbook_path:?}"))?;

    for record in &report.records {
        writeln!(out, "{record}")?;
    }
    writeln!(out, "Wrote {written} players to '{sheet}'")?;
    Ok(())
}

pub fn merge(config: &AppConfig, args: &MergeArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let workbook_path = args.workbook.as_deref().unwrap_or(config.workbook.as_path());
    let sheet = args.sheet.as_deref().unwrap_or(&config.scores.sheet);

    let entries = read_entries(BufReader::new(fs_err::File::open(&args.scores)?))
        .with_context(|| format!("While trying to parse {:?}", args.scores))?;
    let mut book = Workbook::load(workbook_path)?;
    let outcome = merge_scores(&mut book, sheet, &entries, &config.scores.layout)?;
    book.save(workbook_path)
        .with_context(|| format!("While saving {workbook_path:?}"))?;

    writeln!(out, "{RULE}")?;
    writeln!(out, "Sheet Updates:")?;
    if outcome.updates.is_empty() {
        writeln!(out, "No updates.")?;
    }
    for update in &outcome.updates {
        writeln!(out, "{update}")?;
    }
    writeln!(out, "{RULE}")?;
    if !outcome.active.is_empty() {
        writeln!(out, "Active List:")?;
        for name in &outcome.active {
            writeln!(out, "- {name}")?;
        }
        writeln!(out, "{RULE}")?;
    }
    for name in &outcome.unmatched {
        warn!("No row for {name:?} on '{sheet}'");
    }
    Ok(())
}
