//! Table-driven tests for the selection filter.

mod common;

use common::{CandidateBuilder, SelectionBuilder};
use dsgsync::classify::{Category, Flags, Language};
use dsgsync::selection::{
    included, required_subfolders, schedule_link_included, ContentType, ScheduleGroup,
    UserSelection,
};

const PLAIN_EN: &str = "https://site/English/2025-12-07-en.pdf";
const PLAIN_FR: &str = "https://site/French/2025-12-07-fr.pdf";
const AUDIO_EN: &str = "https://site/Audio/2025-12-07-audio-en.mp3";
const AUDIO_FR: &str = "https://site/Audio/2025-12-07-audio-fr.mp3";
const FULL_EN: &str = "https://site/English/Full%20DSG/2025-12-07-full-dsg-en.pdf";
const FULL_DE: &str = "https://site/German/Full%20DSG/2025-12-07-full-dsg-de.pdf";
const BUNDLED_REFS: &str = "https://site/Full%20DSG/Bible-References-2025-12-en.pdf";
const STANDALONE_REFS: &str = "https://site/Bible%20References/2025-12-07-en.pdf";
const YOUTH_FR: &str = "https://site/Youth/2025-12-youth-dsg-fr.pdf";

fn flags(href: &str) -> Flags {
    CandidateBuilder::new(href)
        .header("Divine Service Prep")
        .build()
        .flags()
}

/// Represents a single filter test case.
struct FilterTestCase {
    name: &'static str,
    selection: fn() -> UserSelection,
    included: &'static [&'static str],
    excluded: &'static [&'static str],
}

const FILTER_TESTS: &[FilterTestCase] = &[
    FilterTestCase {
        name: "nothing_selected_includes_nothing",
        selection: || SelectionBuilder::new().build(),
        included: &[],
        excluded: &[PLAIN_EN, PLAIN_FR, AUDIO_EN, FULL_EN, BUNDLED_REFS, YOUTH_FR],
    },
    FilterTestCase {
        name: "global_language_only_takes_plain_documents",
        selection: || SelectionBuilder::new().content(ContentType::English).build(),
        included: &[PLAIN_EN],
        excluded: &[PLAIN_FR, AUDIO_EN, FULL_EN, STANDALONE_REFS],
    },
    FilterTestCase {
        name: "type_without_language_takes_every_language",
        selection: || SelectionBuilder::new().content(ContentType::Audio).build(),
        included: &[AUDIO_EN, AUDIO_FR],
        excluded: &[PLAIN_EN, PLAIN_FR, FULL_EN],
    },
    FilterTestCase {
        name: "type_falls_back_to_global_language",
        selection: || {
            SelectionBuilder::new()
                .contents(&[ContentType::French, ContentType::Audio])
                .build()
        },
        included: &[PLAIN_FR, AUDIO_FR],
        excluded: &[PLAIN_EN, AUDIO_EN],
    },
    FilterTestCase {
        name: "per_type_languages_override_global",
        selection: || {
            SelectionBuilder::new()
                .contents(&[ContentType::English, ContentType::FullDsg])
                .languages_for(ContentType::FullDsg, &[Language::German])
                .build()
        },
        included: &[PLAIN_EN, FULL_DE],
        excluded: &[FULL_EN, PLAIN_FR],
    },
    FilterTestCase {
        name: "bundled_references_come_with_references",
        selection: || SelectionBuilder::new().content(ContentType::BibleReferences).build(),
        included: &[BUNDLED_REFS, STANDALONE_REFS],
        excluded: &[FULL_EN],
    },
    FilterTestCase {
        name: "bundled_references_come_with_full_dsg",
        selection: || SelectionBuilder::new().content(ContentType::FullDsg).build(),
        included: &[BUNDLED_REFS, FULL_EN, FULL_DE],
        excluded: &[STANDALONE_REFS],
    },
    FilterTestCase {
        name: "bundled_references_suppressed_when_both_selected",
        selection: || {
            SelectionBuilder::new()
                .contents(&[ContentType::FullDsg, ContentType::BibleReferences])
                .build()
        },
        included: &[FULL_EN, STANDALONE_REFS],
        excluded: &[BUNDLED_REFS],
    },
    FilterTestCase {
        name: "youth_type_respects_global_language",
        selection: || {
            SelectionBuilder::new()
                .contents(&[ContentType::English, ContentType::Youth])
                .build()
        },
        included: &[PLAIN_EN],
        excluded: &[YOUTH_FR],
    },
    FilterTestCase {
        name: "youth_type_alone",
        selection: || SelectionBuilder::new().content(ContentType::Youth).build(),
        included: &[YOUTH_FR],
        excluded: &[PLAIN_FR],
    },
];

#[test]
fn test_filter_table() {
    for case in FILTER_TESTS {
        let selection = (case.selection)();

        for href in case.included {
            assert!(
                included(&flags(href), &selection),
                "Test '{}': expected {} to be included",
                case.name,
                href
            );
        }
        for href in case.excluded {
            assert!(
                !included(&flags(href), &selection),
                "Test '{}': expected {} to be excluded",
                case.name,
                href
            );
        }
    }
}

#[test]
fn test_no_signals_and_no_selection_is_excluded() {
    assert!(!included(&Flags::default(), &UserSelection::default()));
}

#[test]
fn test_schedule_links() {
    let selection = SelectionBuilder::new()
        .schedule_group(ScheduleGroup::DistrictServingSchedules)
        .subgroup(ScheduleGroup::DistrictServingSchedules, "Kitchener")
        .schedule_group(ScheduleGroup::NaccCalendars)
        .build();

    assert!(schedule_link_included(
        "District Serving Schedules",
        "Kitchener",
        "/Schedules/Kitchener-Serving-Schedule.pdf",
        &selection
    ));
    assert!(schedule_link_included(
        "district serving schedules",
        "District A",
        "/Schedules/KITCHENER%20East.pdf",
        &selection
    ));
    assert!(!schedule_link_included(
        "District Serving Schedules",
        "London",
        "/Schedules/London-Serving-Schedule.pdf",
        &selection
    ));
    assert!(schedule_link_included(
        "NACC Calendars",
        "Anything",
        "/Calendars/NACC-2026.pdf",
        &selection
    ));
    assert!(!schedule_link_included(
        "Youth Schedules",
        "Kitchener",
        "/Schedules/Youth-Kitchener.pdf",
        &selection
    ));
    assert!(!schedule_link_included(
        "Announcements",
        "Kitchener",
        "/Kitchener.pdf",
        &selection
    ));
}

#[test]
fn test_required_subfolders() {
    let selection = SelectionBuilder::new()
        .contents(&[
            ContentType::English,
            ContentType::French,
            ContentType::BibleReading,
            ContentType::Audio,
            ContentType::Foreword,
        ])
        .schedule_group(ScheduleGroup::SeniorsSchedules)
        .schedule_group(ScheduleGroup::YouthSchedules)
        .build();

    let folders = required_subfolders(&selection);

    let mut sorted = folders.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(folders, sorted);
    for expected in [
        Category::Dsg,
        Category::Audio,
        Category::Forward,
        Category::Youth,
        Category::Seniors,
    ] {
        assert!(folders.contains(&expected), "missing {:?}", expected);
    }
    assert_eq!(folders.len(), 5);
}
