//! Configuration file for the CLI
//!
//! `defaults/league-sheets.toml` is embedded so the binary runs without a
//! config file; a file passed with `--config` replaces it entirely.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use roster_core::{ParserConfig, Preset, RosterLayout, ScoreLayout};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/league-sheets.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    #[serde(default = "default_pdftotext")]
    pub pdftotext: String,
    pub workbook: PathBuf,
    #[serde(default)]
    pub parser: ParserSection,
    pub roster: RosterSection,
    pub scores: ScoreSection,
}

fn default_pdftotext() -> String {
    roster_core::document::DEFAULT_PDFTOTEXT.to_string()
}

fn default_true() -> bool {
    true
}

/// Parser settings: a preset, tweaked by the keys below it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserSection {
    pub preset: Option<Preset>,
    pub collapse_middle_initial: Option<bool>,
    pub overrides: BTreeMap<String, String>,
    /// Full parser configuration, used instead of `preset` when present
    pub custom: Option<ParserConfig>,
}

impl ParserSection {
    /// Build the parser configuration. A preset given on the command line
    /// wins over both `preset` and `custom`.
    pub fn resolve(&self, preset: Option<Preset>) -> ParserConfig {
        let mut config = match (preset, &self.custom) {
            (Some(p), _) => p.config(),
            (None, Some(custom)) => custom.clone(),
            (None, None) => self.preset.unwrap_or(Preset::Standings).config(),
        };
        if let Some(collapse) = self.collapse_middle_initial {
            config.names.collapse_middle_initial = collapse;
        }
        config.names.overrides.extend(
            self.overrides
                .iter()
                .map(|(raw, display)| (raw.clone(), display.clone())),
        );
        config
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RosterSection {
    pub sheet: String,
    #[serde(default = "default_true")]
    pub stamp_status: bool,
    #[serde(flatten)]
    pub layout: RosterLayout,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScoreSection {
    pub sheet: String,
    #[serde(flatten)]
    pub layout: ScoreLayout,
}

impl AppConfig {
    /// Load `path`, or the embedded defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let text = fs_err::read_to_string(path)?;
                Self::from_toml(&text).with_context(|| format!("While trying to parse {path:?}"))
            }
            None => Self::from_toml(DEFAULT_TOML).context("While parsing built-in defaults"),
        }
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{CellRef, Column, ExtractionMode};

    #[test]
    fn test_embedded_defaults_parse() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.pdftotext, "pdftotext");
        assert_eq!(config.roster.sheet, "Handicap Bank | WEDNESDAY");
        assert!(config.roster.stamp_status);
        assert_eq!(config.roster.layout.status_cell, Some("F4".parse::<CellRef>().unwrap()));
        assert_eq!(config.scores.layout, ScoreLayout::default());
        assert_eq!(config.parser.overrides.len(), 2);
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let config = AppConfig::load(None).unwrap();
        let parser = config.parser.resolve(None);
        assert_eq!(parser.extraction, ExtractionMode::Single);
        assert_eq!(
            parser.names.overrides.get("RONNIE DUNCAN").map(String::as_str),
            Some("Ronnie Duncan")
        );
    }

    #[test]
    fn test_cli_preset_wins() {
        let config = AppConfig::load(None).unwrap();
        let parser = config.parser.resolve(Some(Preset::TeamRosters));
        assert_eq!(parser.extraction, ExtractionMode::Multi);
        assert_eq!(parser.names.overrides.len(), 2);
    }

    #[test]
    fn test_minimal_file() {
        let config = AppConfig::from_toml(
            r#"
workbook = "book.json"

[parser]
preset = "team-rosters"
collapse-middle-initial = true

[roster]
sheet = "Open Handicap Bank | WEDNESDAY"
stamp-status = false

[scores]
sheet = "Sidepot"
name-column = "C"
"#,
        )
        .unwrap();
        assert_eq!(config.pdftotext, "pdftotext");
        assert!(!config.roster.stamp_status);
        assert_eq!(config.roster.layout, RosterLayout::default());
        assert_eq!(config.scores.layout.name_column, "C".parse::<Column>().unwrap());
        assert_eq!(config.scores.layout.games, 3);

        let parser = config.parser.resolve(None);
        assert_eq!(parser.extraction, ExtractionMode::Multi);
        assert!(parser.names.collapse_middle_initial);
    }

    #[test]
    fn test_custom_parser_section() {
        let config = AppConfig::from_toml(
            r#"
workbook = "book.json"

[parser.custom]
start-marker = "Roster"
stop-marker = "Substitutes"
extraction = "multi"
leading-fields = { exactly = 1 }

[roster]
sheet = "A"

[scores]
sheet = "B"
"#,
        )
        .unwrap();
        let parser = config.parser.resolve(None);
        assert_eq!(parser.start_marker, "Roster");
        assert_eq!(parser.stop_marker.as_deref(), Some("Substitutes"));
        assert_eq!(parser.leading_fields, roster_core::LeadingFields::Exactly(1));
    }

    #[test]
    fn test_bad_cell_reference_rejected() {
        let result = AppConfig::from_toml(
            r#"
workbook = "book.json"
[roster]
sheet = "A"
first-cell = "2A"
[scores]
sheet = "B"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/league.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/league.toml"));
    }
}
