//! Placeholder substitution for already-rendered packet text.
//!
//! Templates carry fixed tokens (`DAY`, `DATE`, page references such as
//! `P105`) that are swapped for live values after rendering. Tokens are
//! applied in a single left-to-right pass over the text, trying tokens in
//! registration order at each position; substituted output is never
//! rescanned. Date/day literals register before numeric page markers, so a
//! short numeric token can never match digits inside a freshly substituted
//! date.

use chrono::{Datelike, NaiveDate};

use crate::models::{Packet, Page};

pub const FINNISH_DAYS: [&str; 7] = [
    "MAANANTAI",
    "TIISTAI",
    "KESKIVIIKKO",
    "TORSTAI",
    "PERJANTAI",
    "LAUANTAI",
    "SUNNUNTAI",
];

pub const FINNISH_MONTHS: [&str; 12] = [
    "TAMMIKUU",
    "HELMIKUU",
    "MAALISKUU",
    "HUHTIKUU",
    "TOUKOKUU",
    "KESÄKUU",
    "HEINÄKUU",
    "ELOKUU",
    "SYYSKUU",
    "LOKAKUU",
    "MARRASKUU",
    "JOULUKUU",
];

/// The rendered values for the `DAY` and `DATE` template tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStamp {
    /// Upper-case Finnish day name, e.g. `MAANANTAI`.
    pub day: String,
    /// Day name plus day.month, e.g. `MAANANTAI 16.11.`.
    pub date: String,
}

impl DateStamp {
    pub fn from_date(date: NaiveDate) -> Self {
        let day = FINNISH_DAYS[date.weekday().num_days_from_monday() as usize];
        DateStamp {
            day: day.to_string(),
            date: format!("{day} {}.{}.", date.day(), date.month()),
        }
    }

    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }
}

/// An ordered token table applied in one pass.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    tokens: Vec<(String, String)>,
}

impl Substitutions {
    /// Registers the `DATE` and `DAY` tokens for a stamp. `DATE` comes
    /// first: the longer literal wins when both could match.
    pub fn for_date(stamp: &DateStamp) -> Self {
        Substitutions {
            tokens: vec![
                ("DATE".to_string(), stamp.date.clone()),
                ("DAY".to_string(), stamp.day.clone()),
            ],
        }
    }

    /// Registers a page-reference token (e.g. `P105` → `P186`). Page
    /// references are tried after the date literals.
    pub fn page_ref(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.tokens.push((from.into(), to.into()));
        self
    }

    /// Applies all tokens in one left-to-right pass.
    ///
    /// At each position the first registered token that matches is replaced
    /// and scanning resumes after the replacement — replacement text is
    /// never itself substituted.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        'scan: while i < text.len() {
            for (from, to) in &self.tokens {
                if text[i..].starts_with(from.as_str()) {
                    out.push_str(to);
                    i += from.len();
                    continue 'scan;
                }
            }
            let Some(c) = text[i..].chars().next() else {
                break;
            };
            out.push(c);
            i += c.len_utf8();
        }
        out
    }

    /// Applies the tokens to every packet's text.
    pub fn apply_packets(&self, packets: &mut [Packet]) {
        for packet in packets {
            packet.text = self.apply(&packet.text);
        }
    }

    /// Applies the tokens to every packet of every subpage.
    pub fn apply_page(&self, page: &mut Page) {
        for subpage in &mut page.subpages {
            self.apply_packets(&mut subpage.packets);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
