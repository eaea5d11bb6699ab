//! seminar-feed: upcoming-week seminar schedules from operator spreadsheets.
//!
//! This crate ties the two layers together for the CLI, the integration
//! harnesses and the benches:
//!
//! ```text
//! table.json ──► load_table ──► feed_core::WindowFilter ──► retained rows
//!                     │
//!                     └──► feed_sheets::Publisher ──► ScheduleItem feed
//! ```
//!
//! Tables on disk are JSON arrays. Each element is either an array of cells
//! (a sheet row) or an object of header → cell (a column-mapped record).

pub use feed_core::{
    filter_upcoming, normalize, CellValue, ColumnHint, DateNormalizer, NormalizedDate, Row,
    RowVerdict, UpcomingWindow, WindowFilter, YearRange, UPCOMING_DAYS,
};
pub use feed_sheets::{
    extract_spreadsheet_id, merge_tabs, publish, search, sheet_tabs, tab_range, ColumnMapping,
    Config, Publisher, ScheduleItem, SheetError, Table,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One row of an on-disk table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRow {
    Cells(Vec<CellValue>),
    Record(BTreeMap<String, CellValue>),
}

impl Row for TableRow {
    fn cell(&self, index: usize) -> Option<&CellValue> {
        match self {
            TableRow::Cells(cells) => cells.cell(index),
            TableRow::Record(record) => record.cell(index),
        }
    }

    fn cells(&self) -> impl Iterator<Item = &CellValue> {
        let iter: Box<dyn Iterator<Item = &CellValue> + '_> = match self {
            TableRow::Cells(cells) => Box::new(cells.iter()),
            TableRow::Record(record) => Box::new(record.values()),
        };
        iter
    }
}

/// Read a JSON table of mixed sheet rows and records.
pub fn load_rows(path: &Path) -> anyhow::Result<Vec<TableRow>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {} as a JSON table", path.display()))
}

/// Read a JSON table of sheet rows, header first.
pub fn load_table(path: &Path) -> anyhow::Result<Table> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as an array of sheet rows", path.display()))
}

/// Turn a `--date-column` argument into a hint.
///
/// A plain number is a 0-based index. Anything else is a header name or A1
/// reference resolved against the first row of `rows`.
pub fn date_hint(spec: Option<&str>, rows: &[TableRow]) -> anyhow::Result<ColumnHint> {
    let Some(spec) = spec.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(ColumnHint::NONE);
    };
    if let Ok(index) = spec.parse::<i64>() {
        return Ok(index.into());
    }
    let header = match rows.first() {
        Some(TableRow::Cells(cells)) => cells.as_slice(),
        _ => &[],
    };
    let index = feed_sheets::resolve_column(spec, header)
        .with_context(|| format!("resolving --date-column {spec:?}"))?;
    Ok(index.into())
}
