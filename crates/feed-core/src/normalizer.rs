//! Normalizer: turn one raw spreadsheet cell into a [`NormalizedDate`].
//!
//! Parsing is attempted in order: numeric serial → noise stripping →
//! format-priority list → native fallback → filler-word retry. Every stage
//! result must pass the [`YearRange`] gate. Nothing here returns an error;
//! "not a date" is an ordinary outcome for titles, names, and room numbers.

use crate::locale::{self, Locale, MonthWidth, INDONESIAN};
use crate::types::{CellValue, NormalizedDate};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Days between the Excel epoch (1899-12-30) and the Unix epoch.
pub const UNIX_EPOCH_SERIAL: f64 = 25569.0;

// ---------------------------------------------------------------------------
// Year gate
// ---------------------------------------------------------------------------

/// Plausible years for a schedule date, both bounds exclusive.
///
/// A syntactically valid parse whose year falls outside the range is treated
/// exactly like an unparseable cell. Changing the institution's window means
/// changing [`YearRange::DEFAULT`] and redeploying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub const DEFAULT: YearRange = YearRange::new(2020, 2030);

    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        year > self.low && year < self.high
    }

    /// Anchor year for two-digit years (`yy`).
    fn reference_year(&self) -> i32 {
        self.low + (self.high - self.low) / 2
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Format list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `d`: day of month, `3[01]|[0-2]?\d`.
    Day,
    /// `M`: month number, `1[0-2]|0?\d`.
    Month,
    /// `MMMM` / `MMM`: month name in the format's locale.
    MonthName(MonthWidth),
    /// `yyyy`: one to four digits, taken literally.
    Year,
    /// `yy`: one or two digits, resolved to the nearest century.
    ShortYear,
    /// `HH`: `2[0-3]|[01]?\d`.
    Hour,
    /// `mm`: `[0-5]?\d`.
    Minute,
    Literal(char),
}

use Token::{Day, Hour, Literal, Minute, Month, MonthName, ShortYear, Year};

const SLASH: Token = Literal('/');
const SPACE: Token = Literal(' ');
const COLON: Token = Literal(':');

/// One entry of the priority list: a pattern and the locale its month names
/// are read in.
#[derive(Debug)]
pub struct DateFormat {
    pub pattern: &'static str,
    pub locale: &'static Locale,
    tokens: &'static [Token],
}

/// Formats tried against the cleaned string, in priority order.
///
/// The order is load-bearing: `d/M/yyyy` must precede `d/M/yy` so that a
/// four-digit year is read as written, and a two-digit year falls through the
/// year gate to the `yy` form.
pub static FORMATS: &[DateFormat] = &[
    DateFormat {
        pattern: "d/M/yyyy",
        locale: &INDONESIAN,
        tokens: &[Day, SLASH, Month, SLASH, Year],
    },
    DateFormat {
        pattern: "d/M/yy",
        locale: &INDONESIAN,
        tokens: &[Day, SLASH, Month, SLASH, ShortYear],
    },
    DateFormat {
        pattern: "yyyy/M/d",
        locale: &INDONESIAN,
        tokens: &[Year, SLASH, Month, SLASH, Day],
    },
    DateFormat {
        pattern: "d MMMM yyyy",
        locale: &INDONESIAN,
        tokens: &[Day, SPACE, MonthName(MonthWidth::Wide), SPACE, Year],
    },
    DateFormat {
        pattern: "d MMM yyyy",
        locale: &INDONESIAN,
        tokens: &[Day, SPACE, MonthName(MonthWidth::Abbreviated), SPACE, Year],
    },
    DateFormat {
        pattern: "d MMMM yy",
        locale: &INDONESIAN,
        tokens: &[Day, SPACE, MonthName(MonthWidth::Wide), SPACE, ShortYear],
    },
    DateFormat {
        pattern: "d MMMM yyyy HH:mm",
        locale: &INDONESIAN,
        tokens: &[
            Day,
            SPACE,
            MonthName(MonthWidth::Wide),
            SPACE,
            Year,
            SPACE,
            Hour,
            COLON,
            Minute,
        ],
    },
    DateFormat {
        pattern: "d/M/yyyy HH:mm",
        locale: &INDONESIAN,
        tokens: &[Day, SLASH, Month, SLASH, Year, SPACE, Hour, COLON, Minute],
    },
];

impl DateFormat {
    /// Parse the whole of `input` against this pattern. Trailing whitespace
    /// is tolerated; any other leftover input is a miss.
    fn parse(&self, input: &str, reference_year: i32) -> Option<NormalizedDate> {
        let mut rest = input;
        let (mut day, mut month, mut year) = (None, None, None);
        let (mut hour, mut minute) = (0, 0);

        for token in self.tokens {
            let (value, consumed) = match *token {
                Day => bounded_number(rest, Some((3, 1)), 2)?,
                Month => bounded_number(rest, Some((1, 2)), 0)?,
                Hour => bounded_number(rest, Some((2, 3)), 1)?,
                Minute => bounded_number(rest, None, 5)?,
                MonthName(width) => self.locale.match_month(rest, width)?,
                Year => leading_digits(rest, 4)?,
                ShortYear => {
                    let (yy, consumed) = leading_digits(rest, 2)?;
                    (two_digit_year(yy, reference_year), consumed)
                }
                Literal(c) => {
                    rest = rest.strip_prefix(c)?;
                    continue;
                }
            };
            match *token {
                Day => day = Some(value),
                Month | MonthName(_) => month = Some(value),
                Year | ShortYear => year = Some(value),
                Hour => hour = value,
                Minute => minute = value,
                Literal(_) => {}
            }
            rest = &rest[consumed..];
        }

        if !rest.trim().is_empty() {
            return None;
        }

        let year = i32::try_from(year?).ok()?;
        let date = NaiveDate::from_ymd_opt(year, month?, day?)?;
        Some(date.and_time(NaiveTime::from_hms_opt(hour, minute, 0)?))
    }
}

/// Match `<lead>[0-<max>]|[0-<optional_lead_max>]?\d` at the start of `input`,
/// trying the capped two-digit form first like a leftmost-first alternation.
fn bounded_number(
    input: &str,
    capped: Option<(u32, u32)>,
    optional_lead_max: u32,
) -> Option<(u32, usize)> {
    let bytes = input.as_bytes();
    let digit = |i: usize| {
        bytes
            .get(i)
            .filter(|b| b.is_ascii_digit())
            .map(|b| u32::from(b - b'0'))
    };

    if let Some((lead, max)) = capped {
        if digit(0) == Some(lead) {
            if let Some(second) = digit(1).filter(|d| *d <= max) {
                return Some((lead * 10 + second, 2));
            }
        }
    }

    let first = digit(0)?;
    match digit(1) {
        Some(second) if first <= optional_lead_max => Some((first * 10 + second, 2)),
        _ => Some((first, 1)),
    }
}

/// Up to `max` leading ASCII digits.
fn leading_digits(input: &str, max: usize) -> Option<(u32, usize)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    input[..len].parse().ok().map(|value| (value, len))
}

/// Resolve a two-digit year to the century that puts it within fifty years
/// of `reference_year`.
fn two_digit_year(yy: u32, reference_year: i32) -> u32 {
    let Ok(reference) = u32::try_from(reference_year) else {
        return yy;
    };
    if reference <= 50 {
        return if yy == 0 { 100 } else { yy };
    }
    let range_end = reference + 50;
    let century = range_end / 100 * 100;
    if yy >= range_end % 100 {
        yy + century - 100
    } else {
        yy + century
    }
}

// ---------------------------------------------------------------------------
// Noise stripping
// ---------------------------------------------------------------------------

fn noise_pattern() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| {
        let words = locale::WEEKDAY_NOISE
            .iter()
            .chain(locale::TIME_NOISE)
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{words})\b")).expect("noise words are escaped literals")
    })
}

/// Lower-case `text`, drop weekday and time-marker words, drop commas, turn
/// `.` and `-` into `/`, and collapse whitespace.
///
/// `"Jumat, 21-11-2025 Pukul 13.00"` becomes `"21/11/2025 13/00"`.
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = noise_pattern().replace_all(&lowered, "");
    let separated: String = stripped
        .chars()
        .filter(|c| *c != ',')
        .map(|c| if c == '.' || c == '-' { '/' } else { c })
        .collect();
    separated.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Native fallback
// ---------------------------------------------------------------------------

const NATIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M",
];

const NATIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

/// Locale-agnostic parse of the original text: RFC 3339, RFC 2822, ISO forms,
/// US numeric dates, and English month names.
fn parse_native(text: &str) -> Option<NormalizedDate> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            NATIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        })
        .or_else(|| {
            NATIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Drop leading words that carry no date information (no digit, not a month
/// name), such as a misspelled weekday. `None` if nothing was dropped or
/// nothing is left.
fn strip_leading_filler(text: &str) -> Option<String> {
    let is_filler = |word: &str| {
        let bare = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        !bare.chars().any(|c| c.is_ascii_digit())
            && !locale::ENGLISH_MONTH_WORDS.contains(bare.as_str())
            && INDONESIAN.wide_months.get(bare.as_str()).is_none()
            && INDONESIAN.abbreviated_months.get(bare.as_str()).is_none()
    };

    let words: Vec<&str> = text.split_whitespace().collect();
    let skipped = words.iter().take_while(|w| is_filler(w)).count();
    if skipped == 0 || skipped == words.len() {
        return None;
    }
    Some(words[skipped..].join(" "))
}

// ---------------------------------------------------------------------------
// DateNormalizer
// ---------------------------------------------------------------------------

/// Converts raw cells into dates. Cheap to copy; holds only the year gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateNormalizer {
    years: YearRange,
}

impl DateNormalizer {
    pub const fn new() -> Self {
        Self::with_year_range(YearRange::DEFAULT)
    }

    pub const fn with_year_range(years: YearRange) -> Self {
        Self { years }
    }

    pub fn year_range(&self) -> YearRange {
        self.years
    }

    /// Normalize one cell. Only numeric-typed cells take the serial path; a
    /// string of digits is parsed as text.
    pub fn normalize(&self, value: &CellValue) -> Option<NormalizedDate> {
        match value {
            CellValue::Number(serial) => self.normalize_serial(*serial),
            CellValue::Text(text) => self.normalize_text(text),
            CellValue::Empty | CellValue::Bool(_) => None,
        }
    }

    /// Interpret `serial` as an Excel day count from 1899-12-30. Fractions are
    /// times of day. The arithmetic is timezone-free: the result is the wall
    /// clock reading the sheet author typed.
    pub fn normalize_serial(&self, serial: f64) -> Option<NormalizedDate> {
        if !serial.is_finite() {
            return None;
        }
        let millis = ((serial - UNIX_EPOCH_SERIAL) * 86_400.0 * 1_000.0).round();
        let date = DateTime::from_timestamp_millis(millis as i64)?.naive_utc();
        self.accept(date, "serial")
    }

    pub fn normalize_text(&self, text: &str) -> Option<NormalizedDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.parse_text(text).or_else(|| {
            let remainder = strip_leading_filler(text)?;
            self.parse_text(&remainder)
        })
    }

    fn parse_text(&self, text: &str) -> Option<NormalizedDate> {
        let cleaned = clean(text);
        self.parse_formats(&cleaned)
            .or_else(|| parse_native(text).and_then(|date| self.accept(date, "native")))
    }

    /// Walk [`FORMATS`] in order. Each format is tried on the first token;
    /// only when that token does not parse at all is the full cleaned string
    /// tried. A token that parses to an implausible year moves straight on to
    /// the next format.
    fn parse_formats(&self, cleaned: &str) -> Option<NormalizedDate> {
        let first_token = cleaned.split(' ').next().unwrap_or_default();
        let reference_year = self.years.reference_year();

        FORMATS.iter().find_map(|format| {
            match format.parse(first_token, reference_year) {
                Some(date) => self.accept(date, format.pattern),
                None => format
                    .parse(cleaned, reference_year)
                    .and_then(|date| self.accept(date, format.pattern)),
            }
        })
    }

    fn accept(&self, date: NormalizedDate, stage: &str) -> Option<NormalizedDate> {
        if self.years.contains(date.year()) {
            tracing::trace!(%date, stage, "date accepted");
            Some(date)
        } else {
            tracing::trace!(%date, stage, "implausible year rejected");
            None
        }
    }
}

/// Normalize with the default year range.
pub fn normalize(value: &CellValue) -> Option<NormalizedDate> {
    DateNormalizer::new().normalize(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
