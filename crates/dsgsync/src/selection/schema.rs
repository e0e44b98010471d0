use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{Category, Language};
use crate::error::ConfigError;

/// A kind of document the user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContentType {
    English,
    French,
    Audio,
    Transcript,
    BibleReferences,
    BibleReading,
    FullDsg,
    SpecialEditionDsg,
    Foreword,
    Youth,
    ChildrensService,
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::English,
        ContentType::French,
        ContentType::Audio,
        ContentType::Transcript,
        ContentType::BibleReferences,
        ContentType::BibleReading,
        ContentType::FullDsg,
        ContentType::SpecialEditionDsg,
        ContentType::Foreword,
        ContentType::Youth,
        ContentType::ChildrensService,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::English => "english",
            ContentType::French => "french",
            ContentType::Audio => "audio",
            ContentType::Transcript => "transcript",
            ContentType::BibleReferences => "bible references",
            ContentType::BibleReading => "bible reading",
            ContentType::FullDsg => "full dsg",
            ContentType::SpecialEditionDsg => "special edition dsg",
            ContentType::Foreword => "foreword",
            ContentType::Youth => "youth",
            ContentType::ChildrensService => "childrens service",
        }
    }

    /// Parses a label, accepting the older aliases the portal forms used.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        let alias = match label.as_str() {
            "references" => Some(ContentType::BibleReferences),
            "special dsg" | "se dsg" => Some(ContentType::SpecialEditionDsg),
            "forward" => Some(ContentType::Foreword),
            "children" | "children's service" => Some(ContentType::ChildrensService),
            "transcripts" => Some(ContentType::Transcript),
            _ => None,
        };
        alias.or_else(|| Self::ALL.into_iter().find(|t| t.label() == label))
    }

    /// Global language selections, as opposed to document types.
    pub fn language(self) -> Option<Language> {
        match self {
            ContentType::English => Some(Language::English),
            ContentType::French => Some(Language::French),
            _ => None,
        }
    }

    /// Subfolder this selection downloads into.
    pub fn category(self) -> Category {
        match self {
            ContentType::English | ContentType::French => Category::Dsg,
            ContentType::Audio => Category::Audio,
            ContentType::Transcript => Category::Transcripts,
            ContentType::BibleReferences => Category::BibleReferences,
            // Bible-reading sheets carry no category of their own and are
            // filed with the weekly documents.
            ContentType::BibleReading => Category::Dsg,
            ContentType::FullDsg => Category::FullDsg,
            ContentType::SpecialEditionDsg => Category::SpecialDsg,
            ContentType::Foreword => Category::Forward,
            ContentType::Youth => Category::Youth,
            ContentType::ChildrensService => Category::ChildrensService,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for ContentType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentType::parse(&value).ok_or(ConfigError::UnknownLabel {
            kind: "content type",
            value,
        })
    }
}

impl From<ContentType> for String {
    fn from(t: ContentType) -> Self {
        t.label().to_string()
    }
}

/// A schedule section on the portal's Schedules page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScheduleGroup {
    DistrictServingSchedules,
    YouthSchedules,
    SeniorsSchedules,
    NaccCalendars,
}

impl ScheduleGroup {
    pub const ALL: [ScheduleGroup; 4] = [
        ScheduleGroup::DistrictServingSchedules,
        ScheduleGroup::YouthSchedules,
        ScheduleGroup::SeniorsSchedules,
        ScheduleGroup::NaccCalendars,
    ];

    /// Section header as shown on the portal.
    pub fn label(self) -> &'static str {
        match self {
            ScheduleGroup::DistrictServingSchedules => "District Serving Schedules",
            ScheduleGroup::YouthSchedules => "Youth Schedules",
            ScheduleGroup::SeniorsSchedules => "Seniors Schedules",
            ScheduleGroup::NaccCalendars => "NACC Calendars",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(label))
    }

    pub fn category(self) -> Category {
        match self {
            ScheduleGroup::DistrictServingSchedules => Category::Schedules,
            ScheduleGroup::YouthSchedules => Category::Youth,
            ScheduleGroup::SeniorsSchedules => Category::Seniors,
            ScheduleGroup::NaccCalendars => Category::NaccCalendars,
        }
    }
}

impl fmt::Display for ScheduleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for ScheduleGroup {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ScheduleGroup::parse(&value).ok_or(ConfigError::UnknownLabel {
            kind: "schedule group",
            value,
        })
    }
}

impl From<ScheduleGroup> for String {
    fn from(g: ScheduleGroup) -> Self {
        g.label().to_string()
    }
}

/// Highlight colour with components in `[0, 1]`, written as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub fn components(self) -> [f32; 3] {
        [self.0, self.1, self.2]
    }

    pub fn is_valid(self) -> bool {
        self.components().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

fn default_opacity() -> f32 {
    0.5
}

/// Everything the user picked for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    #[serde(default)]
    pub content_types: BTreeSet<ContentType>,

    #[serde(default)]
    pub full_dsg_langs: BTreeSet<Language>,

    #[serde(default)]
    pub se_dsg_langs: BTreeSet<Language>,

    #[serde(default)]
    pub bible_reading_langs: BTreeSet<Language>,

    #[serde(default)]
    pub bible_references_langs: BTreeSet<Language>,

    #[serde(default)]
    pub foreword_langs: BTreeSet<Language>,

    #[serde(default)]
    pub schedule_groups: BTreeSet<ScheduleGroup>,

    /// Sub-selections per group, e.g. district names.
    #[serde(default)]
    pub schedule_subgroups: BTreeMap<ScheduleGroup, BTreeSet<String>>,

    /// Minister name to highlight colour.
    #[serde(default)]
    pub minister_highlight_colors: BTreeMap<String, Rgb>,

    #[serde(default = "default_opacity")]
    pub highlight_opacity: f32,
}

impl Default for UserSelection {
    fn default() -> Self {
        Self {
            content_types: BTreeSet::new(),
            full_dsg_langs: BTreeSet::new(),
            se_dsg_langs: BTreeSet::new(),
            bible_reading_langs: BTreeSet::new(),
            bible_references_langs: BTreeSet::new(),
            foreword_langs: BTreeSet::new(),
            schedule_groups: BTreeSet::new(),
            schedule_subgroups: BTreeMap::new(),
            minister_highlight_colors: BTreeMap::new(),
            highlight_opacity: default_opacity(),
        }
    }
}

impl UserSelection {
    pub fn has(&self, content_type: ContentType) -> bool {
        self.content_types.contains(&content_type)
    }

    /// Languages selected globally (English and/or French).
    pub fn global_languages(&self) -> BTreeSet<Language> {
        self.content_types
            .iter()
            .filter_map(|t| t.language())
            .collect()
    }

    /// Selected document types, excluding the global language picks.
    pub fn type_filters(&self) -> impl Iterator<Item = ContentType> + '_ {
        self.content_types
            .iter()
            .copied()
            .filter(|t| t.language().is_none())
    }

    /// Per-type language restriction, empty when the type has none.
    pub fn languages_for(&self, content_type: ContentType) -> &BTreeSet<Language> {
        static NONE: BTreeSet<Language> = BTreeSet::new();
        match content_type {
            ContentType::FullDsg => &self.full_dsg_langs,
            ContentType::SpecialEditionDsg => &self.se_dsg_langs,
            ContentType::BibleReading => &self.bible_reading_langs,
            ContentType::BibleReferences => &self.bible_references_langs,
            ContentType::Foreword => &self.foreword_langs,
            _ => &NONE,
        }
    }

    pub fn subgroups_for(&self, group: ScheduleGroup) -> Option<&BTreeSet<String>> {
        self.schedule_subgroups.get(&group).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.schedule_groups.is_empty()
    }
}
