//! Live score merging
//!
//! Scraped game scores are matched to sheet rows by exact name and written
//! into the game columns. A filled game cell is never overwritten; each
//! merge adds at most one score per player.

use std::fmt;
use std::io::Read;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sheet::{CellValue, Column, Workbook, Worksheet};
use crate::types::{Score, ScoreEntry};

/// Where names and game scores live on the score sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScoreLayout {
    pub name_column: Column,
    pub first_row: u32,
    /// Last row searched, inclusive
    pub last_row: u32,
    /// Column of game one; later games follow to the right
    pub first_game_column: Column,
    pub games: u32,
}

impl Default for ScoreLayout {
    fn default() -> Self {
        Self {
            name_column: Column::new(2),
            first_row: 2,
            last_row: 51,
            first_game_column: Column::new(4),
            games: 3,
        }
    }
}

/// A score written during a merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreUpdate {
    pub name: String,
    /// Game number, 1-based
    pub game: u32,
    pub score: CellValue,
}

impl fmt::Display for ScoreUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} finished their {} game with a {}.",
            self.name,
            ordinal(self.game),
            self.score
        )
    }
}

fn ordinal(game: u32) -> String {
    match game {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        n => format!("{n}th"),
    }
}

/// Result of one merge pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeOutcome {
    pub updates: Vec<ScoreUpdate>,
    /// Matched players whose last game is still open
    pub active: Vec<String>,
    /// Entries with no matching row
    pub unmatched: Vec<String>,
}

/// Parse the scraper's JSON list.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<ScoreEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

fn to_cell(score: &Score) -> CellValue {
    match score {
        Score::Int(v) => CellValue::Int(*v),
        Score::Float(v) => CellValue::Float(*v),
        Score::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(CellValue::Int)
            .unwrap_or_else(|_| CellValue::Text(s.clone())),
    }
}

/// Merge entries into `sheet`.
pub fn merge_into(
    sheet: &mut Worksheet,
    entries: &[ScoreEntry],
    layout: &ScoreLayout,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for entry in entries {
        let row = (layout.first_row..=layout.last_row).find(|&row| {
            sheet
                .get(layout.name_column.cell(row))
                .and_then(CellValue::as_text)
                == Some(entry.name.as_str())
        });
        let Some(row) = row else {
            debug!("No row for {:?}", entry.name);
            outcome.unmatched.push(entry.name.clone());
            continue;
        };

        let first_game = layout.first_game_column.cell(row);
        for (i, score) in entry.scores.iter().enumerate().take(layout.games as usize) {
            let cell = first_game.offset_column(i as u32);
            if sheet.is_empty_cell(cell) {
                let value = to_cell(score);
                sheet.set(cell, value.clone());
                outcome.updates.push(ScoreUpdate {
                    name: entry.name.clone(),
                    game: i as u32 + 1,
                    score: value,
                });
                break;
            }
        }

        if layout.games > 0 {
            let last_game = first_game.offset_column(layout.games - 1);
            if sheet.get(last_game).map_or(true, CellValue::is_blank) {
                outcome.active.push(entry.name.clone());
            }
        }
    }

    info!(
        "Merged {} scores ({} players still bowling, {} unmatched)",
        outcome.updates.len(),
        outcome.active.len(),
        outcome.unmatched.len()
    );
    outcome
}

/// Resolve `sheet_name` in `book` and merge entries into it.
///
/// A missing sheet fails before any cell is touched.
pub fn merge_scores(
    book: &mut Workbook,
    sheet_name: &str,
    entries: &[ScoreEntry],
    layout: &ScoreLayout,
) -> Result<MergeOutcome> {
    let sheet = book.sheet_mut(sheet_name)?;
    Ok(merge_into(sheet, entries, layout))
}
