//! Data types for roster parsing
//!
//! This module contains the records produced by the parser and the score
//! entries consumed by the merger. All types implement Serialize and
//! Deserialize so the CLI can emit and read them as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Average token as printed on the standings sheet.
///
/// Either all digits (`"185"`) or a `bk`-prefixed placeholder (`"bk12"`)
/// for a bowler without an established average. The text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Average(String);

impl Average {
    /// Validate an average token.
    ///
    /// # Examples
    /// ```
    /// use roster_core::Average;
    ///
    /// assert!(Average::parse("185").is_some());
    /// assert!(Average::parse("bk12").is_some());
    /// assert!(Average::parse("bk").is_none());
    /// assert!(Average::parse("18a").is_none());
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        let digits = token.strip_prefix("bk").unwrap_or(token);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    /// Whether this is a `bk` placeholder rather than an established average
    pub fn is_book(&self) -> bool {
        self.0.starts_with("bk")
    }

    /// Numeric part of the token, with any `bk` prefix removed
    pub fn value(&self) -> Option<u32> {
        self.0.strip_prefix("bk").unwrap_or(&self.0).parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Average {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Average::parse(&value).ok_or_else(|| format!("not an average token: {value:?}"))
    }
}

impl From<Average> for String {
    fn from(value: Average) -> Self {
        value.0
    }
}

/// One bowler's line from the roster section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name after overrides and normalization
    pub name: String,
    /// Average token
    pub average: Average,
    /// Handicap pins
    pub handicap: u32,
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.average, self.handicap)
    }
}

/// A roster-section line that carried digits but matched no player entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMismatch {
    /// Page number (1-based)
    pub page: usize,
    /// Line number within the page (1-based)
    pub line: usize,
    /// The line as extracted
    pub text: String,
}

/// Outcome of one parser run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterReport {
    /// Records sorted by name
    pub records: Vec<PlayerRecord>,
    /// Dropped lines, in document order
    pub mismatches: Vec<ParseMismatch>,
    /// Whether scanning ended at the terminating marker
    pub stopped_early: bool,
}

impl RosterReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A single game score as scraped; the scraper emits strings, but plain
/// JSON numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Int(v) => write!(f, "{v}"),
            Score::Float(v) => write!(f, "{v}"),
            Score::Text(v) => f.write_str(v),
        }
    }
}

/// One player entry from the scraped live-scoring JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Completed game scores, first game first
    #[serde(rename = "scoresArray")]
    pub scores: Vec<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_book_token() {
        let avg = Average::parse("bk12").unwrap();
        assert!(avg.is_book());
        assert_eq!(avg.value(), Some(12));
        assert_eq!(avg.to_string(), "bk12");
    }

    #[test]
    fn test_average_established() {
        let avg = Average::parse("185").unwrap();
        assert!(!avg.is_book());
        assert_eq!(avg.value(), Some(185));
    }

    #[test]
    fn test_average_rejects_garbage() {
        assert!(Average::parse("").is_none());
        assert!(Average::parse("bk").is_none());
        assert!(Average::parse("BK12").is_none());
        assert!(Average::parse("12bk").is_none());
    }

    #[test]
    fn test_player_record_serialization() {
        let record = PlayerRecord {
            name: "JOHN SMITH".to_string(),
            average: Average::parse("bk12").unwrap(),
            handicap: 15,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"JOHN SMITH","average":"bk12","handicap":15}"#);
    }

    #[test]
    fn test_player_record_rejects_bad_average() {
        let result =
            serde_json::from_str::<PlayerRecord>(r#"{"name":"X","average":"n/a","handicap":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_entry_deserialization() {
        let json = r#"{"name":"Ronnie Duncan","team":"Pin Pals",
            "scoresArray":["187", 201],"date":"10/09"}"#;
        let entry: ScoreEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Ronnie Duncan");
        assert_eq!(entry.scores, vec![Score::Text("187".to_string()), Score::Int(201)]);
    }

    #[test]
    fn test_score_entry_optional_fields() {
        let entry: ScoreEntry = serde_json::from_str(r#"{"name":"A","scoresArray":[]}"#).unwrap();
        assert!(entry.team.is_none());
        assert!(entry.scores.is_empty());
    }
}
