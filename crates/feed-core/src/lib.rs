//! feed-core: date recognition and upcoming-window filtering for seminar-feed.
//!
//! This crate holds the only part of the system with real ambiguity
//! resolution: deciding, per spreadsheet row, whether the event it describes
//! falls between the start of today and the end of the day a week from now.
//!
//! # Architecture
//!
//! ```text
//! table rows ──► WindowFilter ──► retained rows (borrowed, order kept)
//!                    │
//!                    └──► DateNormalizer (serial │ cleaned text │ native)
//! ```
//!
//! Everything here is synchronous and pure. No I/O, no shared mutable state;
//! the wall clock is read once per filtering pass.

pub mod locale;
pub mod normalizer;
pub mod types;
pub mod window;

pub use normalizer::{normalize, DateNormalizer, YearRange};
pub use types::{CellValue, ColumnHint, NormalizedDate, Row};
pub use window::{filter_upcoming, RowVerdict, UpcomingWindow, WindowFilter, UPCOMING_DAYS};
