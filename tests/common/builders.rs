//! Test builders: ergonomic constructors for sheet rows and tables.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use seminar_feed::{CellValue, Table};

// ---------------------------------------------------------------------------
// RowBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for one sheet row.
///
/// # Example
///
/// ```rust
/// let row = RowBuilder::new()
///     .text("Andi")
///     .serial(45810.0)
///     .empty()
///     .build();
/// ```
#[derive(Debug, Default, Clone)]
pub struct RowBuilder {
    cells: Vec<CellValue>,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.cells.push(CellValue::Text(text.into()));
        self
    }

    pub fn serial(mut self, serial: f64) -> Self {
        self.cells.push(CellValue::Number(serial));
        self
    }

    pub fn flag(mut self, flag: bool) -> Self {
        self.cells.push(CellValue::Bool(flag));
        self
    }

    pub fn empty(mut self) -> Self {
        self.cells.push(CellValue::Empty);
        self
    }

    pub fn build(self) -> Vec<CellValue> {
        self.cells
    }
}

/// Shorthand for an all-text row.
pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().fold(RowBuilder::new(), |b, c| b.text(*c)).build()
}

// ---------------------------------------------------------------------------
// TableBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a header-first sheet table.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    rows: Table,
}

impl TableBuilder {
    pub fn with_header(header: &[&str]) -> Self {
        Self {
            rows: vec![text_row(header)],
        }
    }

    pub fn row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn text_row(self, cells: &[&str]) -> Self {
        self.row(text_row(cells))
    }

    pub fn build(self) -> Table {
        self.rows
    }
}
