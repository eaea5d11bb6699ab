//! Spreadsheet links and the value ranges fetched from them.

use crate::error::SheetError;
use regex::Regex;
use std::sync::OnceLock;

/// Columns requested from every tab.
pub const TAB_COLUMNS: &str = "A:Z";

fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("link pattern is valid"))
}

fn bare_id_pattern() -> &'static Regex {
    static BARE: OnceLock<Regex> = OnceLock::new();
    BARE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("id pattern is valid"))
}

/// Pull the spreadsheet id out of a `docs.google.com/spreadsheets/d/<id>/…`
/// link. A bare id is accepted as-is.
pub fn extract_spreadsheet_id(link: &str) -> Result<String, SheetError> {
    let link = link.trim();
    if let Some(id) = link_pattern().captures(link).and_then(|c| c.get(1)) {
        return Ok(id.as_str().to_string());
    }
    if bare_id_pattern().is_match(link) {
        return Ok(link.to_string());
    }
    Err(SheetError::InvalidLink(link.to_string()))
}

/// Split an operator-entered tab list (`"Sheet1, Sheet2"`), dropping blanks.
pub fn sheet_tabs(sheet_name: &str) -> Vec<&str> {
    sheet_name
        .split(',')
        .map(str::trim)
        .filter(|tab| !tab.is_empty())
        .collect()
}

/// A1-notation range for one tab, e.g. `Sheet1!A:Z`.
pub fn tab_range(tab: &str) -> String {
    format!("{tab}!{TAB_COLUMNS}")
}
