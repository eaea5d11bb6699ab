//! Schedule publishing: turns a raw sheet table into the public feed.
//!
//! Row 0 of every table is the header. Data rows pass through the
//! [`WindowFilter`] with the mapped `Tanggal` column as the hint; survivors
//! become [`ScheduleItem`]s labelled with the header text they came from.

use crate::columns::{ColumnMapping, Field, ResolvedColumns};
use crate::config::{Config, OutputConfig};
use crate::error::SheetError;
use chrono::{Local, NaiveDateTime, NaiveTime};
use feed_core::{CellValue, DateNormalizer, RowVerdict, WindowFilter};
use serde::Serialize;
use std::collections::BTreeMap;

/// A raw value table as returned for a sheet range: header row first.
pub type Table = Vec<Vec<CellValue>>;

const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// ScheduleItem
// ---------------------------------------------------------------------------

/// One published event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleItem {
    #[serde(rename = "Nama")]
    pub nama: String,
    #[serde(rename = "Judul")]
    pub judul: String,
    #[serde(rename = "Tanggal")]
    pub tanggal: String,
    #[serde(rename = "Jam")]
    pub jam: String,
    #[serde(rename = "Ruangan")]
    pub ruangan: String,
    pub source: String,
    /// Field name → header text of the column it was read from.
    #[serde(rename = "_labels", skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ScheduleItem {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Nama => &self.nama,
            Field::Judul => &self.judul,
            Field::Tanggal => &self.tanggal,
            Field::Jam => &self.jam,
            Field::Ruangan => &self.ruangan,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Nama => &mut self.nama,
            Field::Judul => &mut self.judul,
            Field::Tanggal => &mut self.tanggal,
            Field::Jam => &mut self.jam,
            Field::Ruangan => &mut self.ruangan,
        }
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Publisher {
    mapping: ColumnMapping,
    output: OutputConfig,
    filter: WindowFilter,
}

impl Publisher {
    pub fn new(mapping: ColumnMapping, output: OutputConfig, filter: WindowFilter) -> Self {
        Self {
            mapping,
            output,
            filter,
        }
    }

    /// A publisher using the global `[columns]` mapping of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.columns.clone(),
            config.output.clone(),
            WindowFilter::default(),
        )
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Publish against the local wall clock.
    pub fn publish(&self, table: &[Vec<CellValue>], source: &str) -> Result<Vec<ScheduleItem>, SheetError> {
        self.publish_at(table, source, Local::now().naive_local())
    }

    /// Publish against a fixed `now`. Items keep the table's row order.
    pub fn publish_at(
        &self,
        table: &[Vec<CellValue>],
        source: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ScheduleItem>, SheetError> {
        let Some((header, rows)) = table.split_first() else {
            return Ok(Vec::new());
        };
        let columns = self.mapping.resolve(header)?;
        let verdicts = self.filter.classify_at(rows, columns.date_hint(), now);

        let items: Vec<ScheduleItem> = rows
            .iter()
            .zip(verdicts)
            .filter(|(_, verdict)| verdict.is_retained())
            .map(|(row, verdict)| self.item(header, row, &columns, verdict, source))
            .collect();

        tracing::debug!(
            source,
            rows = rows.len(),
            published = items.len(),
            "published schedule"
        );
        Ok(items)
    }

    fn item(
        &self,
        header: &[CellValue],
        row: &[CellValue],
        columns: &ResolvedColumns,
        verdict: RowVerdict,
        source: &str,
    ) -> ScheduleItem {
        let mut item = ScheduleItem {
            source: source.to_string(),
            ..Default::default()
        };

        for field in Field::ALL {
            let index = match (field, verdict) {
                (Field::Tanggal, RowVerdict::Scanned { column, .. }) => Some(column),
                _ => columns.get(field),
            };
            let Some(index) = index else { continue };

            let cell = row.get(index).unwrap_or(&CellValue::Empty);
            *item.field_mut(field) = match field {
                Field::Tanggal => self.render_date(cell, verdict),
                Field::Jam => self.render_time(cell),
                _ => render_text(cell),
            };

            if let Some(label) = header.get(index).and_then(CellValue::as_text) {
                let label = label.trim();
                if !label.is_empty() {
                    item.labels.insert(field.to_string(), label.to_string());
                }
            }
        }
        item
    }

    fn render_date(&self, cell: &CellValue, verdict: RowVerdict) -> String {
        match (cell, verdict.date()) {
            (CellValue::Number(_), Some(date)) => date.format(&self.output.date_format).to_string(),
            _ => render_text(cell),
        }
    }

    fn render_time(&self, cell: &CellValue) -> String {
        match cell {
            CellValue::Number(n) if n.is_finite() && *n >= 0.0 => {
                let seconds = (n.fract() * SECONDS_PER_DAY).round() as u32 % 86_400;
                NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                    .map(|t| t.format(&self.output.time_format).to_string())
                    .unwrap_or_else(|| render_text(cell))
            }
            _ => render_text(cell),
        }
    }
}

fn render_text(cell: &CellValue) -> String {
    cell.to_string().trim().to_string()
}

/// Publish `table` with default output formats.
pub fn publish(
    table: &[Vec<CellValue>],
    mapping: &ColumnMapping,
    source: &str,
    normalizer: DateNormalizer,
    now: NaiveDateTime,
) -> Result<Vec<ScheduleItem>, SheetError> {
    Publisher::new(mapping.clone(), OutputConfig::default(), WindowFilter::new(normalizer))
        .publish_at(table, source, now)
}

// ---------------------------------------------------------------------------
// Search and merging
// ---------------------------------------------------------------------------

/// Case-insensitive substring search over `Nama`, `Judul` and `Ruangan`.
pub fn search<'a>(items: &'a [ScheduleItem], term: &str) -> Vec<&'a ScheduleItem> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            [Field::Nama, Field::Judul, Field::Ruangan]
                .iter()
                .any(|f| item.field(*f).to_lowercase().contains(&term))
        })
        .collect()
}

/// Concatenate per-tab value tables in tab order.
pub fn merge_tabs<I>(tables: I) -> Table
where
    I: IntoIterator<Item = Table>,
{
    tables.into_iter().flatten().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn mapping() -> ColumnMapping {
        ColumnMapping {
            nama: "Nama Mahasiswa".into(),
            judul: "Judul".into(),
            tanggal: "Hari/Tanggal".into(),
            jam: "Waktu".into(),
            ruangan: "Ruang".into(),
        }
    }

    fn table() -> Table {
        vec![
            text_row(&["Nama Mahasiswa", "Judul", "Hari/Tanggal", "Waktu", "Ruang"]),
            text_row(&["Andi", "Sistem Pakar", "Senin, 2 Juni 2025", "09.00 WITA", "Lab 1"]),
            text_row(&["Budi", "Jaringan Saraf", "Senin, 1 September 2025", "10.00", "Lab 2"]),
            vec![
                "Citra".into(),
                "Basis Data".into(),
                CellValue::Number(45810.0),
                CellValue::Number(0.5625),
                "Aula".into(),
            ],
        ]
    }

    #[test]
    fn publishes_only_upcoming_rows_with_labels() {
        let items = publish(&table(), &mapping(), "ti", DateNormalizer::new(), now()).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].nama, "Andi");
        assert_eq!(items[0].tanggal, "Senin, 2 Juni 2025");
        assert_eq!(items[0].jam, "09.00 WITA");
        assert_eq!(items[0].source, "ti");
        assert_eq!(items[0].labels["Tanggal"], "Hari/Tanggal");
        assert_eq!(items[0].labels["Ruangan"], "Ruang");

        assert_eq!(items[1].nama, "Citra");
        assert_eq!(items[1].tanggal, "02/06/2025");
        assert_eq!(items[1].jam, "13:30");
    }

    #[test]
    fn unmapped_date_uses_scanned_column() {
        let mut mapping = mapping();
        mapping.tanggal.clear();
        let items = publish(&table(), &mapping, "ti", DateNormalizer::new(), now()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tanggal, "Senin, 2 Juni 2025");
        assert_eq!(items[0].labels["Tanggal"], "Hari/Tanggal");
    }

    #[test]
    fn unknown_header_fails() {
        let mut mapping = mapping();
        mapping.ruangan = "Ruangan Sidang".into();
        let err = publish(&table(), &mapping, "ti", DateNormalizer::new(), now()).unwrap_err();
        assert!(matches!(err, SheetError::UnknownColumn(_)));
    }

    #[test]
    fn empty_table_publishes_nothing() {
        let items = publish(&[], &mapping(), "ti", DateNormalizer::new(), now()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn item_serializes_with_sheet_keys() {
        let item = ScheduleItem {
            nama: "Andi".into(),
            source: "ti".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["Nama"], "Andi");
        assert_eq!(json["Tanggal"], "");
        assert!(json.get("_labels").is_none());
    }

    #[test]
    fn search_matches_name_title_and_room() {
        let items = publish(&table(), &mapping(), "ti", DateNormalizer::new(), now()).unwrap();
        assert_eq!(search(&items, "").len(), 2);
        assert_eq!(search(&items, "PAKAR")[0].nama, "Andi");
        assert_eq!(search(&items, "aula")[0].nama, "Citra");
        assert!(search(&items, "Jaringan").is_empty());
    }

    #[test]
    fn tabs_merge_in_order() {
        let merged = merge_tabs(vec![
            vec![text_row(&["a"])],
            vec![],
            vec![text_row(&["b"]), text_row(&["c"])],
        ]);
        assert_eq!(merged, vec![text_row(&["a"]), text_row(&["b"]), text_row(&["c"])]);
    }
}
