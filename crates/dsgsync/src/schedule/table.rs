//! Serving-schedule grids reconstructed from extracted PDF text.
//!
//! Rows are one per line with cells separated by `|`. The first column
//! holds the location, every other column is a service date.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_SHORT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w{3})\b\s+\b(\w{3})\b\s+(\d{1,2})").unwrap());
static RE_WEEKDAY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Sun|Wed|Mon|Tue|Thu|Fri|Sat)\b").unwrap());

const EMPTY_HEADER: &str = "---";

/// A minister's slot on the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Expanded column header, e.g. "Sunday Dec 28".
    pub date: String,
    /// Raw first cell of the row, e.g. "Kitchener East Sun 9:30 AM".
    pub location: String,
}

impl Assignment {
    pub fn city(&self) -> String {
        city_of(&self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ScheduleTable {
    /// Parses pipe-delimited text. Returns `None` when there is no header
    /// row at all.
    pub fn parse(text: &str) -> Option<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let first = lines.first()?;

        let first_cells = split_cells(first);
        let non_empty = first_cells.iter().filter(|c| !c.is_empty()).count();
        let (title, header_index) = if non_empty == 1 {
            let title = first_cells.into_iter().find(|c| !c.is_empty());
            (title, 1)
        } else {
            (None, 0)
        };

        let header_line = lines.get(header_index)?;
        let headers = unique_headers(split_cells(header_line));
        let rows = lines[header_index + 1..]
            .iter()
            .map(|line| split_cells(line))
            .collect();

        Some(Self {
            title,
            headers,
            rows,
        })
    }

    /// Every date column of every row whose cell mentions `query`
    /// (case-insensitive).
    pub fn find_assignments(&self, query: &str) -> Vec<Assignment> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for row in &self.rows {
            let Some(location) = row.first() else {
                continue;
            };
            for (idx, header) in self.headers.iter().enumerate().skip(1) {
                let cell = row.get(idx).map(String::as_str).unwrap_or_default();
                if cell.to_lowercase().contains(&query) {
                    found.push(Assignment {
                        date: format_display_date(header),
                        location: location.clone(),
                    });
                }
            }
        }
        found
    }
}

/// "Sun Dec 28" → "Sunday Dec 28". Anything else is returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    let Some(caps) = RE_SHORT_DATE.captures(raw) else {
        return raw.to_string();
    };
    let day = match &caps[1] {
        "Sun" => "Sunday",
        "Mon" => "Monday",
        "Tue" => "Tuesday",
        "Wed" => "Wednesday",
        "Thu" => "Thursday",
        "Fri" => "Friday",
        "Sat" => "Saturday",
        other => other,
    };
    format!("{} {} {}", day, &caps[2], &caps[3])
}

/// Location text before its first weekday token.
pub fn city_of(location: &str) -> String {
    RE_WEEKDAY_TOKEN
        .split(location)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|').map(|c| c.trim().to_string()).collect()
}

// "Sun Dec 7", "Sun Dec 7" → "Sun Dec 7", "Sun Dec 7_1"; blanks → "---".
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .map(|header| {
            let name = if header.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                header
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}_{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}
