//! Column mapping: which spreadsheet column feeds which schedule field.
//!
//! Operators type either the header text of a column (`"Tanggal Seminar"`)
//! or an A1 cell reference (`"C1"`). Header text is tried first so that a
//! header such as `"Jam"` is never mistaken for column JAM.

use crate::error::SheetError;
use feed_core::CellValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// A1 references
// ---------------------------------------------------------------------------

/// A parsed A1-style cell reference such as `C1` or `AB12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// 0-based column index (`A` → 0).
    pub column: usize,
    /// 1-based row number as written.
    pub row: u32,
}

fn cell_ref_pattern() -> &'static Regex {
    static CELL_REF: OnceLock<Regex> = OnceLock::new();
    CELL_REF.get_or_init(|| {
        Regex::new(r"^\$?([A-Za-z]{1,3})\$?([1-9][0-9]{0,6})$").expect("cell ref pattern is valid")
    })
}

impl ColumnRef {
    pub fn parse(spec: &str) -> Result<Self, SheetError> {
        let invalid = || SheetError::InvalidCellRef(spec.to_string());
        let caps = cell_ref_pattern().captures(spec.trim()).ok_or_else(invalid)?;
        let column = caps[1]
            .bytes()
            .map(|b| usize::from(b.to_ascii_uppercase() - b'A') + 1)
            .fold(0, |acc, digit| acc * 26 + digit)
            - 1;
        let row = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { column, row })
    }

    /// Column letters for a 0-based index (`0` → `A`, `26` → `AA`).
    pub fn letters(column: usize) -> String {
        let mut n = column + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl FromStr for ColumnRef {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::letters(self.column), self.row)
    }
}

/// Resolve an operator-entered column spec against a header row.
///
/// Blank specs mean "not mapped" and resolve to `Ok(None)`.
pub fn resolve_column(spec: &str, header: &[CellValue]) -> Result<Option<usize>, SheetError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(None);
    }

    let by_header = header.iter().position(|cell| {
        cell.as_text()
            .is_some_and(|text| text.trim().eq_ignore_ascii_case(spec))
    });
    if let Some(index) = by_header {
        return Ok(Some(index));
    }

    ColumnRef::parse(spec)
        .map(|cell| Some(cell.column))
        .map_err(|_| SheetError::UnknownColumn(spec.to_string()))
}

// ---------------------------------------------------------------------------
// Schedule field mapping
// ---------------------------------------------------------------------------

/// The fixed schedule fields every published item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Nama,
    Judul,
    Tanggal,
    Jam,
    Ruangan,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Nama,
        Field::Judul,
        Field::Tanggal,
        Field::Jam,
        Field::Ruangan,
    ];
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Nama => write!(f, "Nama"),
            Field::Judul => write!(f, "Judul"),
            Field::Tanggal => write!(f, "Tanggal"),
            Field::Jam => write!(f, "Jam"),
            Field::Ruangan => write!(f, "Ruangan"),
        }
    }
}

/// Operator-entered column specs, one per schedule field. Blank means unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    #[serde(alias = "Nama")]
    pub nama: String,
    #[serde(alias = "Judul")]
    pub judul: String,
    #[serde(alias = "Tanggal")]
    pub tanggal: String,
    #[serde(alias = "Jam")]
    pub jam: String,
    #[serde(alias = "Ruangan")]
    pub ruangan: String,
}

impl ColumnMapping {
    pub fn spec(&self, field: Field) -> &str {
        match field {
            Field::Nama => &self.nama,
            Field::Judul => &self.judul,
            Field::Tanggal => &self.tanggal,
            Field::Jam => &self.jam,
            Field::Ruangan => &self.ruangan,
        }
    }

    /// Resolve every mapped field against `header`.
    pub fn resolve(&self, header: &[CellValue]) -> Result<ResolvedColumns, SheetError> {
        let mut resolved = ResolvedColumns::default();
        for field in Field::ALL {
            resolved.indices[field as usize] = resolve_column(self.spec(field), header)?;
        }
        Ok(resolved)
    }
}

/// Column indices for each [`Field`] after resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    indices: [Option<usize>; 5],
}

impl ResolvedColumns {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.indices[field as usize]
    }

    /// The date column, as the window filter's hint.
    pub fn date_hint(&self) -> feed_core::ColumnHint {
        self.get(Field::Tanggal).into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
