//! Resolves which year and month a linked document belongs to.
//!
//! Candidate sources are tried in a fixed order, most trustworthy first:
//!
//! 1. an ISO `YYYY-MM-DD` date in the raw href (also yields the exact day)
//! 2. the "Month Year" of the month page being browsed
//! 3. a "Month Year" phrase in the decoded href
//! 4. a bare four-digit year in the decoded href (year only)
//! 5. a "Month Year" phrase anywhere in href, link text or header
//! 6. a numeric `YYYY-MM` / `YYYY_MM` / `YYYY.MM` token
//!
//! Tier 4 only knows the year, so tiers 5 and 6 still run after it and
//! replace it when they find a month.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use regex::Regex;

use super::href::decode;

const MONTH_ALTERNATION: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2})-(\d{2})-(\d{2})").unwrap());
static RE_HINT_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_ALTERNATION})(?:\s|%20|[_,-])+(20\d{{2}})\b"
    ))
    .unwrap()
});
static RE_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({MONTH_ALTERNATION})[\s,_-]+(20\d{{2}})")).unwrap()
});
static RE_BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])(20\d{2})(?:[^0-9]|$)").unwrap());
static RE_NUMERIC_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2})[-_.](\d{2})").unwrap());

/// Which resolution tier produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSource {
    #[default]
    Unresolved,
    IsoDate,
    PageHint,
    HrefMonthYear,
    HrefYear,
    CombinedText,
    NumericMonth,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateSource::Unresolved => "unresolved",
            DateSource::IsoDate => "iso-date",
            DateSource::PageHint => "page-hint",
            DateSource::HrefMonthYear => "href-month-year",
            DateSource::HrefYear => "href-year",
            DateSource::CombinedText => "combined-text",
            DateSource::NumericMonth => "numeric-month",
        };
        f.write_str(name)
    }
}

/// A partial date. When `exact_date` is set, year and month are derived
/// from it and cannot disagree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedDate {
    year: Option<i32>,
    month: Option<Month>,
    exact_date: Option<NaiveDate>,
    source: DateSource,
}

impl ResolvedDate {
    pub fn exact(date: NaiveDate, source: DateSource) -> Self {
        Self {
            year: Some(date.year()),
            month: month_of(date),
            exact_date: Some(date),
            source,
        }
    }

    pub fn month_year(month: Month, year: i32, source: DateSource) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            exact_date: None,
            source,
        }
    }

    pub fn year_only(year: i32, source: DateSource) -> Self {
        Self {
            year: Some(year),
            month: None,
            exact_date: None,
            source,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// Full English month name, e.g. "December".
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.map(|m| m.name())
    }

    pub fn exact_date(&self) -> Option<NaiveDate> {
        self.exact_date
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.exact_date.map(|d| d.weekday())
    }

    pub fn source(&self) -> DateSource {
        self.source
    }

    pub fn is_unresolved(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }
}

/// Runs the resolution chain for one link.
pub fn resolve(
    href: &str,
    link_text: &str,
    header_text: &str,
    month_year_hint: Option<&str>,
) -> ResolvedDate {
    if let Some(date) = iso_date(href) {
        return ResolvedDate::exact(date, DateSource::IsoDate);
    }

    let hinted = month_year_hint.and_then(|hint| capture_month_year(&RE_HINT_MONTH_YEAR, hint));
    if let Some((month, year)) = hinted {
        return ResolvedDate::month_year(month, year, DateSource::PageHint);
    }

    let decoded = decode(href);
    if let Some((month, year)) = capture_month_year(&RE_MONTH_YEAR, &decoded) {
        return ResolvedDate::month_year(month, year, DateSource::HrefMonthYear);
    }

    let bare_year = RE_BARE_YEAR
        .captures(&decoded)
        .and_then(|caps| caps[1].parse::<i32>().ok());

    let combined = format!("{} {} {}", decoded, link_text, header_text).to_lowercase();
    if let Some((month, year)) = capture_month_year(&RE_MONTH_YEAR, &combined) {
        return ResolvedDate::month_year(month, year, DateSource::CombinedText);
    }

    if let Some((year, month)) = numeric_month(&combined).or_else(|| numeric_month(&decoded)) {
        return match month {
            Some(month) => ResolvedDate::month_year(month, year, DateSource::NumericMonth),
            None => ResolvedDate::year_only(year, DateSource::NumericMonth),
        };
    }

    match bare_year {
        Some(year) => ResolvedDate::year_only(year, DateSource::HrefYear),
        None => ResolvedDate::default(),
    }
}

/// Parses "Month Year" out of free text, e.g. a listing entry.
pub fn parse_month_year(text: &str) -> Option<(Month, i32)> {
    capture_month_year(&RE_HINT_MONTH_YEAR, text)
}

/// Maps a two-digit month number ("01".."12") to its month.
pub fn month_from_number(number: &str) -> Option<Month> {
    number
        .parse::<u8>()
        .ok()
        .and_then(|n| Month::try_from(n).ok())
}

fn month_of(date: NaiveDate) -> Option<Month> {
    u8::try_from(date.month())
        .ok()
        .and_then(|n| Month::try_from(n).ok())
}

// First ISO token that is also a real calendar date.
fn iso_date(raw: &str) -> Option<NaiveDate> {
    RE_ISO_DATE.captures_iter(raw).find_map(|caps| {
        let year = caps[1].parse::<i32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        let day = caps[3].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

fn capture_month_year(re: &Regex, text: &str) -> Option<(Month, i32)> {
    let caps = re.captures(text)?;
    let month = caps[1].to_lowercase().parse::<Month>().ok()?;
    let year = caps[2].parse::<i32>().ok()?;
    Some((month, year))
}

fn numeric_month(text: &str) -> Option<(i32, Option<Month>)> {
    let caps = RE_NUMERIC_MONTH.captures(text)?;
    let year = caps[1].parse::<i32>().ok()?;
    Some((year, month_from_number(&caps[2])))
}
