//! Text parsers for league standings sheets
//!
//! - `roster`: section scanner over page text
//! - `line`: player entry pattern for one line
//! - `names`: override table and middle-initial collapsing

pub mod line;
pub mod names;
pub mod roster;

pub use line::{LineMatcher, RawEntry};
pub use names::NameNormalizer;
pub use roster::{RosterParser, ScanState};
