//! feed-sheets: the spreadsheet side of seminar-feed.
//!
//! Turns operator input (a sheet link, comma-separated tab names, column
//! specs) and raw value tables into the published schedule feed. Date
//! decisions are delegated to [`feed_core`].
//!
//! # Flow
//!
//! ```text
//! link ──► spreadsheet id + tab ranges ──► per-tab tables ──► merge_tabs
//!                                                                │
//! config [columns] ──► ColumnMapping::resolve(header) ──► Publisher ──► ScheduleItem feed
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod link;
pub mod schedule;

pub use columns::{resolve_column, ColumnMapping, ColumnRef, Field, ResolvedColumns};
pub use config::{Config, OutputConfig, SourceConfig};
pub use error::SheetError;
pub use link::{extract_spreadsheet_id, sheet_tabs, tab_range};
pub use schedule::{merge_tabs, publish, search, Publisher, ScheduleItem, Table};
