use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const LOCATION_SCAN_LINES: usize = 20;

static RE_FULL_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(20\d{2})\b",
    )
    .unwrap()
});
static RE_SHORT_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\.?\s+(20\d{2})\b").unwrap()
});
static RE_SERVICE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)\.?\s+[A-Za-z]{3,9}\s+\d{1,2}\b").unwrap()
});

/// Header facts pulled from a schedule's text before the grid is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleMetadata {
    pub location: Option<String>,
    pub month: Option<String>,
    pub year: Option<i32>,
    /// Service dates in order of first appearance, e.g. "Sun Dec 7".
    pub dates: Vec<String>,
}

pub fn extract_schedule_metadata(text: &str) -> ScheduleMetadata {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let location = lines
        .iter()
        .take(LOCATION_SCAN_LINES)
        .find(|l| l.to_lowercase().contains("district"))
        .or_else(|| lines.first())
        .map(|l| l.to_string());

    let (month, year) = RE_FULL_MONTH_YEAR
        .captures(text)
        .or_else(|| RE_SHORT_MONTH_YEAR.captures(text))
        .map(|caps| (Some(title_case(&caps[1])), caps[2].parse().ok()))
        .unwrap_or((None, None));

    let mut seen = HashSet::new();
    let dates = RE_SERVICE_DATE
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|d| seen.insert(d.clone()))
        .collect();

    ScheduleMetadata {
        location,
        month,
        year,
        dates,
    }
}

fn title_case(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
