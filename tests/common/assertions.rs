//! Domain-specific assertion macros for seminar-feed harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! input and the window a row was judged against.

use seminar_feed::CellValue;

// ---------------------------------------------------------------------------
// Normalizer assertions
// ---------------------------------------------------------------------------

/// Assert that a cell normalizes to the given calendar day.
///
/// ```rust
/// assert_normalizes_to!(CellValue::from("2 Juni 2025"), 2025, 6, 2);
/// ```
#[macro_export]
macro_rules! assert_normalizes_to {
    ($cell:expr, $y:expr, $m:expr, $d:expr) => {{
        let cell: seminar_feed::CellValue = $cell.into();
        let expected = chrono::NaiveDate::from_ymd_opt($y, $m, $d).expect("valid expected date");
        match seminar_feed::normalize(&cell) {
            Some(actual) if actual.date() == expected => {}
            Some(actual) => panic!(
                "assert_normalizes_to! failed:\n  input:    {:?}\n  expected: {}\n  actual:   {}",
                cell, expected, actual
            ),
            None => panic!(
                "assert_normalizes_to! failed: {:?} did not normalize (expected {})",
                cell, expected
            ),
        }
    }};
}

/// Assert that a cell is not read as a date.
#[macro_export]
macro_rules! assert_not_a_date {
    ($cell:expr) => {{
        let cell: seminar_feed::CellValue = $cell.into();
        if let Some(actual) = seminar_feed::normalize(&cell) {
            panic!(
                "assert_not_a_date! failed: {:?} normalized to {}",
                cell, actual
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Filter assertions
// ---------------------------------------------------------------------------

/// Positions in `rows` of each retained reference, by identity.
pub fn retained_positions<R>(rows: &[R], retained: &[&R]) -> Vec<usize> {
    retained
        .iter()
        .map(|kept| {
            rows.iter()
                .position(|row| std::ptr::eq(row, *kept))
                .expect("retained row must borrow from the input")
        })
        .collect()
}

/// First text cell of each row, used to name rows in assertions.
pub fn row_names(rows: &[&Vec<CellValue>]) -> Vec<String> {
    rows.iter()
        .map(|row| row.first().map(ToString::to_string).unwrap_or_default())
        .collect()
}

/// Assert that the retained rows are exactly the named ones, in order.
///
/// ```rust
/// assert_retained!(kept, ["Andi", "Citra"]);
/// ```
#[macro_export]
macro_rules! assert_retained {
    ($retained:expr, [$($name:expr),* $(,)?]) => {{
        let actual = $crate::common::row_names(&$retained);
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "retained rows differ");
    }};
}
