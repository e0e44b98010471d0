//! Turning schedule assignments into calendar events.
//!
//! The calendar backend itself is a collaborator behind [`CalendarService`];
//! this module owns the date arithmetic and duplicate detection.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

use super::table::Assignment;

static RE_START_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}:\d{2}\s+[AP]M)").unwrap());

const START_FORMAT: &str = "%A %b %d %Y %I:%M %p";
const DUPLICATE_WINDOW_MINUTES: i64 = 5;

/// Longest service an event may span.
pub const MAX_DURATION_HOURS: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// IANA zone name handed to the calendar service.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_duration_hours")]
    pub duration_hours: f64,

    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: u32,
}

fn default_timezone() -> String {
    "America/Toronto".to_string()
}

fn default_duration_hours() -> f64 {
    1.5
}

fn default_reminder_minutes() -> u32 {
    1440
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            duration_hours: default_duration_hours(),
            reminder_minutes: default_reminder_minutes(),
        }
    }
}

impl CalendarSettings {
    pub fn duration(&self) -> Result<TimeDelta, CalendarError> {
        let hours = self.duration_hours;
        if !hours.is_finite() || hours <= 0.0 || hours > MAX_DURATION_HOURS {
            return Err(CalendarError::InvalidDuration { hours });
        }
        TimeDelta::try_seconds((hours * 3600.0).round() as i64)
            .ok_or(CalendarError::InvalidDuration { hours })
    }
}

/// A calendar event ready to be created. Times are wall-clock times in
/// `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSpec {
    pub title: String,
    pub location: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub timezone: String,
    pub reminder_minutes: u32,
}

impl EventSpec {
    /// Builds the event for an assignment. Returns `Ok(None)` when the
    /// location carries no start time.
    pub fn from_assignment(
        assignment: &Assignment,
        today: NaiveDate,
        settings: &CalendarSettings,
    ) -> Result<Option<Self>, CalendarError> {
        let Some(time) = RE_START_TIME.captures(&assignment.location) else {
            return Ok(None);
        };

        let mut year = today.year();
        // A January service listed in December belongs to next year.
        if today.month() == 12 && assignment.date.contains("Jan") {
            year += 1;
        }

        let input = format!("{} {} {}", assignment.date, year, &time[1])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let start = NaiveDateTime::parse_from_str(&input, START_FORMAT)
            .map_err(|source| CalendarError::InvalidStart { input, source })?;

        let city = assignment.city();
        Ok(Some(Self {
            title: format!("Scheduled in {}", city),
            description: format!("Scheduled service at {}", city),
            location: city,
            start,
            end: start + settings.duration()?,
            timezone: settings.timezone.clone(),
            reminder_minutes: settings.reminder_minutes,
        }))
    }
}

pub trait CalendarService {
    /// Titles of events starting between `start` and `end`.
    fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<String>, CalendarError>;

    fn create_event(&self, event: &EventSpec) -> Result<(), CalendarError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: Vec<EventSpec>,
    pub duplicates: Vec<EventSpec>,
    /// Assignments whose location has no start time.
    pub no_time: usize,
    pub failed: Vec<String>,
}

/// Creates one event per timed assignment, skipping any whose title
/// already exists within five minutes of its start.
pub fn sync_assignments(
    assignments: &[Assignment],
    today: NaiveDate,
    settings: &CalendarSettings,
    service: &dyn CalendarService,
) -> SyncReport {
    let mut report = SyncReport::default();
    let window = TimeDelta::minutes(DUPLICATE_WINDOW_MINUTES);

    for assignment in assignments {
        let event = match EventSpec::from_assignment(assignment, today, settings) {
            Ok(Some(event)) => event,
            Ok(None) => {
                debug!("No start time in '{}'", assignment.location);
                report.no_time += 1;
                continue;
            }
            Err(e) => {
                warn!("Skipping {}: {}", assignment.date, e);
                report.failed.push(e.to_string());
                continue;
            }
        };

        let existing = match service.events_between(event.start - window, event.start + window) {
            Ok(titles) => titles,
            Err(e) => {
                warn!("Could not list events for {}: {}", assignment.date, e);
                report.failed.push(e.to_string());
                continue;
            }
        };
        if existing.iter().any(|t| *t == event.title) {
            info!("Skipping: '{}' already exists on {}", event.title, assignment.date);
            report.duplicates.push(event);
            continue;
        }

        match service.create_event(&event) {
            Ok(()) => {
                info!("Created: {} on {}", event.title, assignment.date);
                report.created.push(event);
            }
            Err(e) => {
                warn!("Failed to create {}: {}", event.title, e);
                report.failed.push(e.to_string());
            }
        }
    }

    report
}
