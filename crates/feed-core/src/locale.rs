//! Static locale tables used by the date normalizer.
//!
//! Month names are matched by prefix against a lower-cased string, wide names
//! first, then abbreviations, then single-letter narrow forms. The tables are
//! ordered so that iteration order is the match priority.

use phf::{phf_ordered_map, phf_set};

/// Month-name tables for one language.
#[derive(Debug)]
pub struct Locale {
    pub code: &'static str,
    /// Full month names, e.g. `agustus`.
    pub wide_months: &'static phf::OrderedMap<&'static str, u32>,
    /// Abbreviated month names, e.g. `agt`.
    pub abbreviated_months: &'static phf::OrderedMap<&'static str, u32>,
    /// Single-letter month initials. The first entry for a letter wins.
    pub narrow_months: &'static phf::OrderedMap<char, u32>,
}

/// How much of a month name a pattern accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthWidth {
    /// `MMMM`: wide, then abbreviated, then narrow.
    Wide,
    /// `MMM`: abbreviated, then narrow.
    Abbreviated,
}

impl Locale {
    /// Match a month name at the start of `input`, returning the month number
    /// and the number of bytes consumed.
    pub fn match_month(&self, input: &str, width: MonthWidth) -> Option<(u32, usize)> {
        let prefixed = |table: &phf::OrderedMap<&'static str, u32>| {
            table
                .entries()
                .find(|&(name, _)| input.starts_with(*name))
                .map(|(name, month)| (*month, name.len()))
        };

        let named = match width {
            MonthWidth::Wide => {
                prefixed(self.wide_months).or_else(|| prefixed(self.abbreviated_months))
            }
            MonthWidth::Abbreviated => prefixed(self.abbreviated_months),
        };

        named.or_else(|| {
            let first = input.chars().next()?;
            self.narrow_months
                .get(&first)
                .map(|month| (*month, first.len_utf8()))
        })
    }
}

static ID_WIDE: phf::OrderedMap<&'static str, u32> = phf_ordered_map! {
    "januari" => 1,
    "februari" => 2,
    "maret" => 3,
    "april" => 4,
    "mei" => 5,
    "juni" => 6,
    "juli" => 7,
    "agustus" => 8,
    "september" => 9,
    "oktober" => 10,
    "november" => 11,
    "desember" => 12,
};

static ID_ABBREVIATED: phf::OrderedMap<&'static str, u32> = phf_ordered_map! {
    "jan" => 1,
    "feb" => 2,
    "mar" => 3,
    "apr" => 4,
    "mei" => 5,
    "jun" => 6,
    "jul" => 7,
    "agt" => 8,
    "sep" => 9,
    "okt" => 10,
    "nov" => 11,
    "des" => 12,
};

static ID_NARROW: phf::OrderedMap<char, u32> = phf_ordered_map! {
    'j' => 1,
    'f' => 2,
    'm' => 3,
    'a' => 4,
    's' => 9,
    'o' => 10,
    'n' => 11,
    'd' => 12,
};

/// Indonesian, the language the schedules are authored in.
pub static INDONESIAN: Locale = Locale {
    code: "id",
    wide_months: &ID_WIDE,
    abbreviated_months: &ID_ABBREVIATED,
    narrow_months: &ID_NARROW,
};

/// Weekday names stripped as noise before pattern matching. Longer spellings
/// come before their prefixes (`jum'at` before `jumat`).
pub const WEEKDAY_NOISE: &[&str] = &[
    "senin", "selasa", "rabu", "kamis", "jum'at", "jumat", "sabtu", "minggu", "monday",
    "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Time markers and Indonesian time-zone abbreviations stripped as noise.
pub const TIME_NOISE: &[&str] = &["pukul", "jam", "wita", "wib", "wit"];

/// English month words, full and abbreviated. A leading word in this set is
/// never treated as filler by the lenient fallback.
pub static ENGLISH_MONTH_WORDS: phf::Set<&'static str> = phf_set! {
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
};
