//! Roster section scanner
//!
//! Walks page text line by line, tracks whether the roster section is open,
//! and collects player entries from the lines inside it.

use log::{debug, info};

use crate::config::ParserConfig;
use crate::document::Document;
use crate::error::Result;
use crate::types::{ParseMismatch, PlayerRecord, RosterReport};

use super::line::LineMatcher;
use super::names::NameNormalizer;

/// Where the scanner is relative to the roster section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside the section, waiting for a start or continuation marker
    Seeking,
    /// Inside the section, reading player rows
    InRoster,
    /// Terminating marker seen; nothing further is read
    Done,
}

/// Parses roster sections out of extracted standings text.
///
/// # Example
/// ```
/// use roster_core::{ParserConfig, RosterParser};
///
/// let parser = RosterParser::new(ParserConfig::default()).unwrap();
/// let page = "Team Rosters\nName Avg HDCP\nJOHN A. SMITH 185 bk12 15\n";
/// let report = parser.parse_pages([page]);
/// assert_eq!(report.records[0].name, "JOHN SMITH");
/// assert_eq!(report.records[0].average.as_str(), "bk12");
/// assert_eq!(report.records[0].handicap, 15);
/// ```
#[derive(Debug, Clone)]
pub struct RosterParser {
    config: ParserConfig,
    matcher: LineMatcher,
    names: NameNormalizer,
}

impl RosterParser {
    /// Build a parser, validating the configuration and compiling its patterns.
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let matcher = LineMatcher::new(config.extraction, config.leading_fields)?;
        let names = NameNormalizer::new(&config.names)?;
        Ok(Self {
            config,
            matcher,
            names,
        })
    }

    /// Parse every page of a loaded document.
    pub fn parse_document(&self, document: &Document) -> RosterReport {
        self.parse_pages(document.pages())
    }

    /// Parse page texts in order. Records come back sorted by name; equal
    /// names keep document order.
    pub fn parse_pages<I, P>(&self, pages: I) -> RosterReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut report = RosterReport::default();
        let mut state = ScanState::Seeking;

        'pages: for (page_idx, page) in pages.into_iter().enumerate() {
            if self.config.reset_each_page {
                state = ScanState::Seeking;
            }

            for (line_idx, line) in page.as_ref().lines().enumerate() {
                state = self.step(state, page_idx, line_idx, line, &mut report);
                if state == ScanState::Done {
                    report.stopped_early = true;
                    break 'pages;
                }
            }
        }

        report.records.sort_by(|a, b| a.name.cmp(&b.name));
        info!(
            "Parsed {} roster records ({} unmatched lines)",
            report.records.len(),
            report.mismatches.len()
        );
        report
    }

    fn step(
        &self,
        state: ScanState,
        page_idx: usize,
        line_idx: usize,
        line: &str,
        report: &mut RosterReport,
    ) -> ScanState {
        if contains_opt(line, self.config.stop_marker.as_deref()) {
            debug!("page {}: stop marker, ending scan", page_idx + 1);
            return ScanState::Done;
        }

        if contains_all(line, &self.config.banner_markers) {
            debug!("page {}: skipping banner {:?}", page_idx + 1, line);
            return state;
        }

        let starts = self.is_start_line(line);
        if starts && self.config.skip_start_line {
            return ScanState::InRoster;
        }
        let state = if starts || self.is_continuation_line(page_idx, line) {
            ScanState::InRoster
        } else {
            state
        };
        if state != ScanState::InRoster {
            return state;
        }

        if contains_all(line, &self.config.header_markers) {
            return state;
        }
        if !line.bytes().any(|b| b.is_ascii_digit()) {
            return state;
        }

        let entries = self.matcher.extract(line);
        if entries.is_empty() {
            debug!("page {}: no roster entry in {:?}", page_idx + 1, line);
            report.mismatches.push(ParseMismatch {
                page: page_idx + 1,
                line: line_idx + 1,
                text: line.to_string(),
            });
        }
        report
            .records
            .extend(entries.into_iter().map(|entry| PlayerRecord {
                name: self.names.normalize(&entry.name),
                average: entry.average,
                handicap: entry.handicap,
            }));
        state
    }

    fn is_start_line(&self, line: &str) -> bool {
        line.contains(self.config.start_marker.as_str())
    }

    fn is_continuation_line(&self, page_idx: usize, line: &str) -> bool {
        page_idx > 0 && contains_opt(line, self.config.continuation_marker.as_deref())
    }
}

fn contains_opt(line: &str, marker: Option<&str>) -> bool {
    marker.is_some_and(|m| !m.is_empty() && line.contains(m))
}

/// True when `markers` is non-empty and every one occurs in `line`
fn contains_all(line: &str, markers: &[String]) -> bool {
    !markers.is_empty() && markers.iter().all(|m| line.contains(m.as_str()))
}
