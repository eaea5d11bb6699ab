//! Static corpora and tables used across harnesses.
//!
//! All dates are relative to [`fixed_now`], Friday 30 May 2025 09:00, whose
//! upcoming window runs from 30 May 00:00 up to (not including) 7 June 00:00.

use chrono::{NaiveDate, NaiveDateTime};
use seminar_feed::{CellValue, Table};

/// The reference "now" for every clock-dependent harness.
pub fn fixed_now() -> NaiveDateTime {
    at(2025, 5, 30, 9, 0)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("fixture dates are valid")
}

pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at(y, m, d, 0, 0)
}

/// Operator-written date strings and the calendar day each must resolve to.
pub const CORPUS_WRITTEN_DATES: &[(&str, (i32, u32, u32))] = &[
    ("21/11/2025", (2025, 11, 21)),
    ("3/1/2025", (2025, 1, 3)),
    ("03.01.25", (2025, 1, 3)),
    ("21-11-2025", (2025, 11, 21)),
    ("2025-11-21", (2025, 11, 21)),
    ("2025/11/21", (2025, 11, 21)),
    ("21 November 2025", (2025, 11, 21)),
    ("5 Agustus 2025", (2025, 8, 5)),
    ("5 agt 2025", (2025, 8, 5)),
    ("17 Mei 2025", (2025, 5, 17)),
    ("21 Desember 25", (2025, 12, 21)),
    ("Senin, 17 November 2025", (2025, 11, 17)),
    ("Senn, 17 November 2025", (2025, 11, 17)),
    ("Jum'at, 21-11-2025 Pukul 13.00 WITA", (2025, 11, 21)),
    ("Kamis, 2 Januari 2025", (2025, 1, 2)),
    ("January 3, 2025", (2025, 1, 3)),
    ("3 January 2025", (2025, 1, 3)),
];

/// Cells that sit next to dates in real sheets and must never read as one.
pub const CORPUS_NOT_DATES: &[&str] = &[
    "",
    "   ",
    "TBA",
    "-",
    "Andi Saputra",
    "Seminar Hasil Tugas Akhir",
    "Ruang 301",
    "Lab Komputer 2",
    "13.00 - 15.00",
    "09.00 WITA",
    "45617",
    "21/11/2035",
    "1999-01-01",
    "31/02/2025",
];

/// A sheet the way operators really fill it in: a header row, dates in mixed
/// shapes, serial cells, a late row with only a time, and a row whose date
/// column is blank but whose notes mention the day.
pub fn seminar_table() -> Table {
    vec![
        row(&["Nama Mahasiswa", "Judul", "Hari/Tanggal", "Waktu", "Ruang", "Catatan"]),
        row(&["Andi", "Sistem Pakar Diagnosa", "Senin, 2 Juni 2025", "09.00 WITA", "Lab 1", ""]),
        row(&["Budi", "Jaringan Saraf Tiruan", "Senin, 1 September 2025", "10.00", "Lab 2", "Diundur dari 2 Juni 2025"]),
        vec![
            "Citra".into(),
            "Basis Data Terdistribusi".into(),
            CellValue::Number(45810.0),
            CellValue::Number(0.5625),
            "Aula".into(),
            CellValue::Empty,
        ],
        row(&["Dewi", "Pengolahan Citra", "", "08.00", "Lab 3", "Jumat 6 Juni 2025"]),
        row(&["Eko", "Kriptografi Ringan", "Rabu, 28 Mei 2025", "13.00", "Aula", ""]),
        row(&["Fajar", "Sistem Terbenam", "TBA", "", "", ""]),
        row(&["Gita", "Data Mining", "7 Juni 2025", "10.00", "Lab 1", ""]),
    ]
}

/// Names of the [`seminar_table`] rows that fall in the window at [`fixed_now`].
pub const SEMINAR_UPCOMING: &[&str] = &["Andi", "Citra", "Dewi"];

fn row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}
