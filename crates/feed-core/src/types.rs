//! Core types for feed-core.
//!
//! This module defines the raw [`CellValue`] read from a spreadsheet, the
//! [`Row`] abstraction the filter scans, and the [`ColumnHint`] that points
//! at the operator-configured date column.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A calendar date-time in local wall-clock time. Never converted to or from UTC.
pub type NormalizedDate = chrono::NaiveDateTime;

/// One spreadsheet cell of unknown shape.
///
/// Deserializes untagged from JSON: `null` → `Empty`, booleans, numbers
/// (Excel-style serials when the sheet is read unformatted), and strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// `true` for missing cells and text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Bool(_) | CellValue::Number(_) => false,
        }
    }

    /// Text content of the cell, if it is a string cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A table row the window filter can inspect.
///
/// Sequence rows are index-addressable. Mapping rows (column-mapped records)
/// have no positional cells, so a column hint never applies to them; their
/// values are scanned in the map's iteration order.
pub trait Row {
    /// The cell at a 0-based column index, if the row has one.
    fn cell(&self, index: usize) -> Option<&CellValue>;

    /// Every cell of the row, in row order.
    fn cells(&self) -> impl Iterator<Item = &CellValue>;
}

impl<R: Row + ?Sized> Row for &R {
    fn cell(&self, index: usize) -> Option<&CellValue> {
        (**self).cell(index)
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        (**self).cells()
    }
}

impl Row for [CellValue] {
    fn cell(&self, index: usize) -> Option<&CellValue> {
        self.get(index)
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.iter()
    }
}

impl Row for Vec<CellValue> {
    fn cell(&self, index: usize) -> Option<&CellValue> {
        self.get(index)
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.iter()
    }
}

impl<const N: usize> Row for [CellValue; N] {
    fn cell(&self, index: usize) -> Option<&CellValue> {
        self.get(index)
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.iter()
    }
}

impl Row for BTreeMap<String, CellValue> {
    fn cell(&self, _index: usize) -> Option<&CellValue> {
        None
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.values()
    }
}

impl<S: std::hash::BuildHasher> Row for HashMap<String, CellValue, S> {
    fn cell(&self, _index: usize) -> Option<&CellValue> {
        None
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.values()
    }
}

// ---------------------------------------------------------------------------
// Column hint
// ---------------------------------------------------------------------------

/// Optional 0-based index of the column the operator configured as the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnHint(Option<usize>);

impl ColumnHint {
    /// No hint: every row is searched cell by cell.
    pub const NONE: ColumnHint = ColumnHint(None);

    pub fn at(index: usize) -> Self {
        ColumnHint(Some(index))
    }

    pub fn index(self) -> Option<usize> {
        self.0
    }
}

impl From<Option<usize>> for ColumnHint {
    fn from(index: Option<usize>) -> Self {
        ColumnHint(index)
    }
}

impl From<usize> for ColumnHint {
    fn from(index: usize) -> Self {
        ColumnHint(Some(index))
    }
}

/// `-1` (or any negative index) means "no hint".
impl From<i64> for ColumnHint {
    fn from(index: i64) -> Self {
        ColumnHint(usize::try_from(index).ok())
    }
}

impl From<i32> for ColumnHint {
    fn from(index: i32) -> Self {
        ColumnHint(usize::try_from(index).ok())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cells_deserialize_untagged() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 45617, "17 November 2025"]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Empty,
                CellValue::Bool(true),
                CellValue::Number(45617.0),
                CellValue::Text("17 November 2025".to_string()),
            ]
        );
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("   ").is_empty());
        assert!(!CellValue::from("x").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn negative_hint_means_none() {
        assert_eq!(ColumnHint::from(-1_i64), ColumnHint::NONE);
        assert_eq!(ColumnHint::from(2_i64).index(), Some(2));
    }

    #[test]
    fn mapping_rows_have_no_positional_cells() {
        let mut row = BTreeMap::new();
        row.insert("Tanggal".to_string(), CellValue::from("17/11/2025"));
        assert!(row.cell(0).is_none());
        assert_eq!(row.cells().count(), 1);
    }
}
