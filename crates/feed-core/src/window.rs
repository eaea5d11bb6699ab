//! Window filter: keeps the rows whose event falls in the upcoming week.
//!
//! The configured date column is authoritative when its cell resolves to a
//! date. Otherwise the whole row is scanned and the first cell that lands
//! inside the window wins.

use crate::normalizer::DateNormalizer;
use crate::types::{ColumnHint, NormalizedDate, Row};
use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};

/// Days after today covered by the upcoming window.
pub const UPCOMING_DAYS: u32 = 7;

// ---------------------------------------------------------------------------
// UpcomingWindow
// ---------------------------------------------------------------------------

/// Half-open interval `[start of today, start of today + horizon + 1 days)`,
/// i.e. today through the end of the day `horizon` days from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpcomingWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl UpcomingWindow {
    pub fn containing(now: NaiveDateTime, horizon_days: u32) -> Self {
        let start = now.date().and_time(NaiveTime::MIN);
        let end = start
            .checked_add_signed(TimeDelta::days(i64::from(horizon_days) + 1))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NormalizedDate) -> bool {
        date >= self.start && date < self.end
    }
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Why a row was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    /// The hinted cell resolved to a date inside the window.
    Hinted(NormalizedDate),
    /// No usable hint; a full-row scan found an in-window date.
    Scanned {
        column: usize,
        date: NormalizedDate,
    },
    /// The hinted cell resolved to a date outside the window. No scan is run.
    HintOutOfWindow(NormalizedDate),
    /// No cell produced an in-window date.
    NoDate,
}

impl RowVerdict {
    pub fn is_retained(&self) -> bool {
        matches!(self, RowVerdict::Hinted(_) | RowVerdict::Scanned { .. })
    }

    /// The date the row was judged by, if any.
    pub fn date(&self) -> Option<NormalizedDate> {
        match *self {
            RowVerdict::Hinted(date)
            | RowVerdict::Scanned { date, .. }
            | RowVerdict::HintOutOfWindow(date) => Some(date),
            RowVerdict::NoDate => None,
        }
    }
}

// ---------------------------------------------------------------------------
// WindowFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFilter {
    normalizer: DateNormalizer,
    horizon_days: u32,
}

impl Default for WindowFilter {
    fn default() -> Self {
        Self::new(DateNormalizer::new())
    }
}

impl WindowFilter {
    pub const fn new(normalizer: DateNormalizer) -> Self {
        Self {
            normalizer,
            horizon_days: UPCOMING_DAYS,
        }
    }

    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    /// The window for a filtering pass that starts at `now`.
    pub fn window_at(&self, now: NaiveDateTime) -> UpcomingWindow {
        UpcomingWindow::containing(now, self.horizon_days)
    }

    /// Filter against the local wall clock, read once for the whole pass.
    pub fn filter_upcoming<'a, R: Row>(
        &self,
        rows: &'a [R],
        hint: impl Into<ColumnHint>,
    ) -> Vec<&'a R> {
        self.filter_upcoming_at(rows, hint, Local::now().naive_local())
    }

    /// Filter against a fixed `now`. Retained rows keep their input order and
    /// are returned untouched.
    pub fn filter_upcoming_at<'a, R: Row>(
        &self,
        rows: &'a [R],
        hint: impl Into<ColumnHint>,
        now: NaiveDateTime,
    ) -> Vec<&'a R> {
        let hint = hint.into();
        let window = self.window_at(now);

        let retained: Vec<&R> = rows
            .iter()
            .filter(|row| self.judge(*row, hint, &window).is_retained())
            .collect();

        tracing::debug!(
            rows = rows.len(),
            retained = retained.len(),
            hint = ?hint.index(),
            start = %window.start,
            end = %window.end,
            "filtered upcoming rows"
        );
        retained
    }

    /// Per-row verdicts against a fixed `now`, in input order.
    pub fn classify_at<R: Row>(
        &self,
        rows: &[R],
        hint: impl Into<ColumnHint>,
        now: NaiveDateTime,
    ) -> Vec<RowVerdict> {
        let hint = hint.into();
        let window = self.window_at(now);
        rows.iter()
            .map(|row| self.judge(row, hint, &window))
            .collect()
    }

    fn judge<R: Row>(&self, row: &R, hint: ColumnHint, window: &UpcomingWindow) -> RowVerdict {
        let hinted = hint
            .index()
            .and_then(|index| row.cell(index))
            .filter(|cell| !cell.is_empty())
            .and_then(|cell| self.normalizer.normalize(cell));

        let verdict = match hinted {
            Some(date) if window.contains(date) => RowVerdict::Hinted(date),
            Some(date) => RowVerdict::HintOutOfWindow(date),
            None => row
                .cells()
                .enumerate()
                .find_map(|(column, cell)| {
                    self.normalizer
                        .normalize(cell)
                        .filter(|date| window.contains(*date))
                        .map(|date| RowVerdict::Scanned { column, date })
                })
                .unwrap_or(RowVerdict::NoDate),
        };

        tracing::trace!(?verdict, "row judged");
        verdict
    }
}

/// Filter with the default normalizer against the local wall clock.
pub fn filter_upcoming<'a, R: Row>(rows: &'a [R], hint: impl Into<ColumnHint>) -> Vec<&'a R> {
    WindowFilter::default().filter_upcoming(rows, hint)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
