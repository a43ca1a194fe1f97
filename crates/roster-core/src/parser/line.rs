//! Player entry extraction from a single roster line.

use regex_lite::Regex;

use crate::config::{ExtractionMode, LeadingFields};
use crate::error::{Result, RosterError};
use crate::types::Average;

/// One entry as matched, before name normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub average: Average,
    pub handicap: u32,
}

/// Compiled roster-row pattern
#[derive(Debug, Clone)]
pub struct LineMatcher {
    pattern: Regex,
    mode: ExtractionMode,
}

impl LineMatcher {
    pub fn new(mode: ExtractionMode, leading: LeadingFields) -> Result<Self> {
        let pattern = Regex::new(&build_pattern(mode, leading))
            .map_err(|e| RosterError::InvalidConfig(format!("roster pattern: {e}")))?;
        Ok(Self { pattern, mode })
    }

    /// Extract every entry this mode allows from `line`.
    ///
    /// Matches whose name is blank or whose handicap does not fit a `u32`
    /// are discarded.
    pub fn extract(&self, line: &str) -> Vec<RawEntry> {
        let captures = self.pattern.captures_iter(line);
        let limit = match self.mode {
            ExtractionMode::Single => 1,
            ExtractionMode::Multi => usize::MAX,
        };

        captures
            .take(limit)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str().trim();
                if name.is_empty() {
                    return None;
                }
                let average = Average::parse(caps.get(2)?.as_str())?;
                let handicap = caps.get(3)?.as_str().parse().ok()?;
                Some(RawEntry {
                    name: name.to_string(),
                    average,
                    handicap,
                })
            })
            .collect()
    }
}

fn build_pattern(mode: ExtractionMode, leading: LeadingFields) -> String {
    let anchor = match mode {
        ExtractionMode::Single => "^",
        ExtractionMode::Multi => "",
    };
    let leading = match leading {
        LeadingFields::Any => r"(?:\d+\s+)*?".to_string(),
        LeadingFields::Exactly(n) => r"\d+\s+".repeat(n),
    };
    format!(r"{anchor}(\D+)\s+{leading}(bk\d+|\d+)\s+(\d+)")
}
