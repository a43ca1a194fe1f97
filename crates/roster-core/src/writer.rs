//! Roster output into a worksheet
//!
//! Records land in three consecutive columns (name, average, handicap)
//! starting at the layout's first cell, one row per record in sorted order.

use chrono::NaiveDateTime;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sheet::{CellRef, Workbook, Worksheet};
use crate::types::PlayerRecord;

/// Format of the status stamp, e.g. `10/14 07:05 PM`
pub const STAMP_FORMAT: &str = "%m/%d %I:%M %p";

/// Where roster rows and the status stamp go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RosterLayout {
    /// Name cell of the first record; average and handicap follow to the right
    pub first_cell: CellRef,
    /// Cell receiving `LAST UPDATED: ...`, if any
    pub status_cell: Option<CellRef>,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            first_cell: CellRef::new(1, 2),
            status_cell: Some(CellRef::new(6, 4)),
        }
    }
}

pub fn status_text(updated_at: NaiveDateTime) -> String {
    format!("LAST UPDATED: {}", updated_at.format(STAMP_FORMAT))
}

/// Write records into `sheet`. Returns the number of rows written.
///
/// Rows below the last record are left as they were.
pub fn write_records(
    sheet: &mut Worksheet,
    records: &[PlayerRecord],
    layout: &RosterLayout,
    updated_at: Option<NaiveDateTime>,
) -> usize {
    let first = layout.first_cell;
    for (offset, record) in records.iter().enumerate() {
        let row = first.with_row(first.row() + offset as u32);
        sheet.set(row, record.name.as_str());
        sheet.set(row.offset_column(1), record.average.as_str());
        sheet.set(row.offset_column(2), record.handicap);
    }

    if let (Some(cell), Some(at)) = (layout.status_cell, updated_at) {
        sheet.set(cell, status_text(at));
    }
    records.len()
}

/// Resolve `sheet_name` in `book` and write records into it.
///
/// A missing sheet fails before any cell is touched.
pub fn write_roster(
    book: &mut Workbook,
    sheet_name: &str,
    records: &[PlayerRecord],
    layout: &RosterLayout,
    updated_at: Option<NaiveDateTime>,
) -> Result<usize> {
    let sheet = book.sheet_mut(sheet_name)?;
    let written = write_records(sheet, records, layout, updated_at);
    info!("Wrote {} roster rows to '{}'", written, sheet_name);
    Ok(written)
}
