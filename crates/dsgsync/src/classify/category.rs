//! Category classification from a signal bag and section header.

use std::fmt;

use serde::Serialize;

use super::flags::Flags;

/// Destination category. Declaration order is the classification
/// precedence order and the order subfolders are created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Forward")]
    Forward,
    #[serde(rename = "Youth")]
    Youth,
    #[serde(rename = "Childrens Service")]
    ChildrensService,
    #[serde(rename = "Full DSGs")]
    FullDsg,
    #[serde(rename = "Special DSG")]
    SpecialDsg,
    #[serde(rename = "Bible References")]
    BibleReferences,
    #[serde(rename = "Audio")]
    Audio,
    #[serde(rename = "Transcripts")]
    Transcripts,
    #[serde(rename = "DSG")]
    Dsg,
    #[serde(rename = "Schedules")]
    Schedules,
    #[serde(rename = "Seniors")]
    Seniors,
    #[serde(rename = "NACC Calendars")]
    NaccCalendars,
}

impl Category {
    /// Name of the subfolder documents of this category are filed under.
    pub fn folder_name(self) -> &'static str {
        match self {
            Category::Forward => "Forward",
            Category::Youth => "Youth",
            Category::ChildrensService => "Childrens Service",
            Category::FullDsg => "Full DSGs",
            Category::SpecialDsg => "Special DSG",
            Category::BibleReferences => "Bible References",
            Category::Audio => "Audio",
            Category::Transcripts => "Transcripts",
            Category::Dsg => "DSG",
            Category::Schedules => "Schedules",
            Category::Seniors => "Seniors",
            Category::NaccCalendars => "NACC Calendars",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// A single boolean signal consulted by the precedence tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Foreword,
    Youth,
    Children,
    FullDsg,
    SpecialEditionDsg,
    BibleReferences,
    Audio,
    Transcript,
    ServingSchedule,
    Senior,
    Nacc,
}

impl Signal {
    pub fn is_set(self, flags: &Flags) -> bool {
        match self {
            Signal::Foreword => flags.foreword,
            Signal::Youth => flags.youth,
            Signal::Children => flags.children,
            Signal::FullDsg => flags.full_dsg,
            Signal::SpecialEditionDsg => flags.special_edition_dsg,
            Signal::BibleReferences => flags.bible_references,
            Signal::Audio => flags.audio,
            Signal::Transcript => flags.transcript,
            Signal::ServingSchedule => flags.serving_schedule,
            Signal::Senior => flags.senior,
            Signal::Nacc => flags.nacc,
        }
    }
}

/// Precedence for links found under a Divine Service Prep listing.
/// Foreword and audience editions come before Full/Special edition so a
/// bible-reference insert inside a Full DSG is filed with its parent.
pub const DSG_PRECEDENCE: &[(Signal, Category)] = &[
    (Signal::Foreword, Category::Forward),
    (Signal::Youth, Category::Youth),
    (Signal::Children, Category::ChildrensService),
    (Signal::FullDsg, Category::FullDsg),
    (Signal::SpecialEditionDsg, Category::SpecialDsg),
    (Signal::BibleReferences, Category::BibleReferences),
    (Signal::Audio, Category::Audio),
    (Signal::Transcript, Category::Transcripts),
];

/// Precedence for everything else (the schedules area).
pub const SCHEDULE_PRECEDENCE: &[(Signal, Category)] = &[
    (Signal::Youth, Category::Youth),
    (Signal::ServingSchedule, Category::Schedules),
    (Signal::Senior, Category::Seniors),
    (Signal::Nacc, Category::NaccCalendars),
];

/// Schedule-group section labels that decide the category on their own.
pub const SCHEDULE_HEADERS: &[(&str, Category)] = &[
    ("youth schedules", Category::Youth),
    ("seniors schedules", Category::Seniors),
    ("nacc calendars", Category::NaccCalendars),
    ("district serving schedules", Category::Schedules),
];

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "signal", rename_all = "snake_case")]
pub enum MatchedRule {
    ScheduleHeader,
    Signal(Signal),
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub rule: MatchedRule,
}

pub fn classify(flags: &Flags, header_text: &str) -> Category {
    classify_detailed(flags, header_text).category
}

/// Classifies and reports which rule fired.
pub fn classify_detailed(flags: &Flags, header_text: &str) -> Classification {
    if flags.dsg_context {
        return first_match(flags, DSG_PRECEDENCE);
    }

    if let Some(category) = schedule_header_category(header_text) {
        return Classification {
            category,
            rule: MatchedRule::ScheduleHeader,
        };
    }

    first_match(flags, SCHEDULE_PRECEDENCE)
}

/// Exact, case-insensitive match of a section header against the known
/// schedule-group labels.
pub fn schedule_header_category(header_text: &str) -> Option<Category> {
    let header = header_text.trim();
    if header.is_empty() {
        return None;
    }
    SCHEDULE_HEADERS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(header))
        .map(|(_, category)| *category)
}

fn first_match(flags: &Flags, table: &[(Signal, Category)]) -> Classification {
    table
        .iter()
        .find(|(signal, _)| signal.is_set(flags))
        .map(|(signal, category)| Classification {
            category: *category,
            rule: MatchedRule::Signal(*signal),
        })
        .unwrap_or(Classification {
            category: Category::Dsg,
            rule: MatchedRule::Default,
        })
}
