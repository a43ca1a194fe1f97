//! Parser configuration
//!
//! Standings sheets from different leagues share the same rough shape but
//! differ in row layout, so every marker and extraction knob is data. Two
//! presets cover the layouts seen so far.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// How many player entries a single line may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// At most one entry, anchored at the start of the line
    Single,
    /// Every entry found anywhere in the line
    Multi,
}

/// Numeric columns printed between the name and the average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadingFields {
    /// Zero or more, fewest first
    Any,
    /// Exactly this many
    Exactly(usize),
}

/// Name clean-up applied to every extracted name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NameRules {
    /// Drop a middle initial such as the `A.` in `JOHN A. SMITH`
    pub collapse_middle_initial: bool,
    /// Raw name -> display name. A hit bypasses all other normalization.
    pub overrides: BTreeMap<String, String>,
}

/// Configuration for [`RosterParser`](crate::parser::RosterParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Line fragment that opens the roster section
    pub start_marker: String,
    /// Fragment that reopens the section on pages after the first
    pub continuation_marker: Option<String>,
    /// Fragment that ends the scan for the whole document
    pub stop_marker: Option<String>,
    /// A line containing all of these is a team/lane banner
    pub banner_markers: Vec<String>,
    /// A line containing all of these is a column header
    pub header_markers: Vec<String>,
    pub extraction: ExtractionMode,
    pub leading_fields: LeadingFields,
    /// Start every page outside the roster section
    pub reset_each_page: bool,
    /// Open the section on the start-marker line without reading rows from it
    pub skip_start_line: bool,
    pub names: NameRules,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Preset::Standings.config()
    }
}

impl ParserConfig {
    /// Reject settings the parser cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.start_marker.trim().is_empty() {
            return Err(RosterError::InvalidConfig(
                "start-marker cannot be empty".to_string(),
            ));
        }
        for (raw, display) in &self.names.overrides {
            if raw.trim().is_empty() || display.trim().is_empty() {
                return Err(RosterError::InvalidConfig(format!(
                    "name override {raw:?} -> {display:?} has an empty side"
                )));
            }
        }
        Ok(())
    }

    /// Replace the override table, keeping everything else.
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.names.overrides = overrides;
        self
    }
}

/// Known standings layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// One bowler per line: `NAME AVG HDCP ...`, stopping at the substitutes list
    Standings,
    /// Several bowlers per line: `NAME N N AVG HDCP NAME N N AVG HDCP ...`
    TeamRosters,
}

impl Preset {
    pub fn config(self) -> ParserConfig {
        match self {
            Preset::Standings => ParserConfig {
                start_marker: "Team Rosters".to_string(),
                continuation_marker: Some("of".to_string()),
                stop_marker: Some("Temporary Substitutes".to_string()),
                banner_markers: vec!["-".to_string(), "Lane".to_string()],
                header_markers: vec!["Name".to_string(), "Avg HDCP".to_string()],
                extraction: ExtractionMode::Single,
                leading_fields: LeadingFields::Any,
                reset_each_page: true,
                skip_start_line: false,
                names: NameRules {
                    collapse_middle_initial: true,
                    overrides: BTreeMap::new(),
                },
            },
            Preset::TeamRosters => ParserConfig {
                start_marker: "Team Rosters".to_string(),
                continuation_marker: None,
                stop_marker: None,
                banner_markers: vec!["-".to_string(), "Lane".to_string()],
                header_markers: vec!["Name".to_string(), "Avg HDCP".to_string()],
                extraction: ExtractionMode::Multi,
                leading_fields: LeadingFields::Exactly(2),
                reset_each_page: false,
                skip_start_line: true,
                names: NameRules::default(),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Standings => f.write_str("standings"),
            Preset::TeamRosters => f.write_str("team-rosters"),
        }
    }
}

impl FromStr for Preset {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standings" => Ok(Preset::Standings),
            "team-rosters" => Ok(Preset::TeamRosters),
            other => Err(RosterError::InvalidConfig(format!("unknown preset: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standings() {
        assert_eq!(ParserConfig::default(), Preset::Standings.config());
    }

    #[test]
    fn test_presets_validate() {
        assert!(Preset::Standings.config().validate().is_ok());
        assert!(Preset::TeamRosters.config().validate().is_ok());
    }

    #[test]
    fn test_empty_start_marker_rejected() {
        let config = ParserConfig {
            start_marker: "  ".to_string(),
            ..ParserConfig::default()
        };
        assert!(matches!(config.validate(), Err(RosterError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_override_rejected() {
        let overrides = BTreeMap::from([("RONNIE DUNCAN".to_string(), String::new())]);
        let config = ParserConfig::default().with_overrides(overrides);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("standings".parse::<Preset>().unwrap(), Preset::Standings);
        assert_eq!("Team-Rosters".parse::<Preset>().unwrap(), Preset::TeamRosters);
        assert!("weekly".parse::<Preset>().is_err());
    }

    #[test]
    fn test_leading_fields_serialization() {
        assert_eq!(serde_json::to_string(&LeadingFields::Any).unwrap(), "\"any\"");
        assert_eq!(
            serde_json::to_string(&LeadingFields::Exactly(2)).unwrap(),
            "{\"exactly\":2}"
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ParserConfig =
            serde_json::from_str(r#"{"extraction":"multi","reset-each-page":false}"#).unwrap();
        assert_eq!(config.extraction, ExtractionMode::Multi);
        assert!(!config.reset_each_page);
        assert_eq!(config.start_marker, "Team Rosters");
    }
}
