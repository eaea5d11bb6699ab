//! Error type for the ingestion layer.

/// Failures in operator-entered configuration. The date engine itself never
/// fails; these only arise from links, column specs, and config files.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("not a Google Sheets link or spreadsheet id: {0:?}")]
    InvalidLink(String),

    #[error("invalid cell reference {0:?} (expected e.g. \"C1\")")]
    InvalidCellRef(String),

    #[error("column {0:?} matches neither a header nor a cell reference")]
    UnknownColumn(String),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
