//! League Sheets Core Library
//!
//! This crate turns bowling-league standings text into player records and
//! writes them into sheets.
//!
//! # Features
//! - Parse name / average / handicap rows from the roster section
//! - Single-entry and multi-entry line layouts, chosen by configuration
//! - Injected name overrides and middle-initial collapsing
//! - Roster writer and live score merger over a JSON-backed workbook

pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod scores;
pub mod sheet;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use config::{ExtractionMode, LeadingFields, NameRules, ParserConfig, Preset};
pub use document::Document;
pub use error::{Result, RosterError};
pub use parser::{RosterParser, ScanState};
pub use scores::{merge_scores, MergeOutcome, ScoreLayout, ScoreUpdate};
pub use sheet::{CellRef, CellValue, Column, Workbook, Worksheet};
pub use types::{Average, ParseMismatch, PlayerRecord, RosterReport, Score, ScoreEntry};
pub use writer::{write_roster, RosterLayout};
