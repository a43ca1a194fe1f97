//! Workbook model
//!
//! A workbook is a set of named worksheets holding A1-addressed cells. It is
//! persisted as a JSON document:
//!
//! ```json
//! { "sheets": { "Handicap Bank": { "A2": "JOHN SMITH", "C2": 15 } } }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// A cell address; column and row are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    // Field order gives row-major ordering.
    row: u32,
    column: u32,
}

impl CellRef {
    /// # Panics
    /// Panics if `column` or `row` is zero.
    pub fn new(column: u32, row: u32) -> Self {
        assert!(column > 0 && row > 0, "cell coordinates are 1-based");
        Self { row, column }
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Same column, different row
    pub fn with_row(&self, row: u32) -> Self {
        Self::new(self.column, row)
    }

    /// Shift right by `offset` columns
    pub fn offset_column(&self, offset: u32) -> Self {
        Self::new(self.column + offset, self.row)
    }
}

/// A column given by its letters in configuration (`"B"`, `"AA"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Column(u32);

impl Column {
    pub fn new(index: u32) -> Self {
        assert!(index > 0, "columns are 1-based");
        Self(index)
    }

    pub fn cell(&self, row: u32) -> CellRef {
        CellRef::new(self.0, row)
    }
}

impl FromStr for Column {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        column_index(s)
            .map(Column)
            .ok_or_else(|| RosterError::InvalidCellRef(s.to_string()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&column_letters(self.0))
    }
}

impl TryFrom<String> for Column {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Column> for String {
    fn from(value: Column) -> Self {
        value.to_string()
    }
}

/// Parse column letters (`"A"`, `"AA"`) into a 1-based index.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.bytes().try_fold(0u32, |acc, b| {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Format a 1-based column index as letters.
pub fn column_letters(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

impl FromStr for CellRef {
    type Err = RosterError;

    /// # Examples
    /// ```
    /// use roster_core::sheet::CellRef;
    ///
    /// let cell: CellRef = "AA10".parse().unwrap();
    /// assert_eq!((cell.column(), cell.row()), (27, 10));
    /// assert!("10A".parse::<CellRef>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RosterError::InvalidCellRef(s.to_string());
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);
        let column = column_index(letters).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Self { row, column })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row)
    }
}

impl TryFrom<String> for CellRef {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(value: CellRef) -> Self {
        value.to_string()
    }
}

/// Contents of a non-empty cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Empty text and zero count as blank, like a spreadsheet truthiness test.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Int(v) => *v == 0,
            CellValue::Float(v) => *v == 0.0,
            CellValue::Text(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

/// One named sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Worksheet {
    cells: BTreeMap<CellRef, CellValue>,
}

impl Worksheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: CellRef) -> Option<&CellValue> {
        self.cells.get(&cell)
    }

    pub fn set(&mut self, cell: CellRef, value: impl Into<CellValue>) {
        self.cells.insert(cell, value.into());
    }

    /// True when the cell holds no value at all.
    pub fn is_empty_cell(&self, cell: CellRef) -> bool {
        !self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A collection of named worksheets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    sheets: BTreeMap<String, Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a sheet.
    pub fn add_sheet(&mut self, name: &str) -> &mut Worksheet {
        self.sheets.entry(name.to_string()).or_default()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.sheets.get(name).ok_or_else(|| self.not_found(name))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        if !self.sheets.contains_key(name) {
            return Err(self.not_found(name));
        }
        self.sheets.get_mut(name).ok_or_else(|| RosterError::SheetNotFound {
            name: name.to_string(),
            available: Vec::new(),
        })
    }

    fn not_found(&self, name: &str) -> RosterError {
        RosterError::SheetNotFound {
            name: name.to_string(),
            available: self.sheet_names(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| RosterError::Workbook(e.to_string()))
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| RosterError::Workbook(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| RosterError::Workbook(format!("cannot open {path:?}: {e}")))?;
        Self::from_reader(BufReader::new(file))
            .map_err(|e| RosterError::Workbook(format!("{path:?}: {e}")))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| RosterError::Workbook(format!("cannot create {path:?}: {e}")))?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer
            .flush()
            .map_err(|e| RosterError::Workbook(format!("cannot write {path:?}: {e}")))
    }
}
