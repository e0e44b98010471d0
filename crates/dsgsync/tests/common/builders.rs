//! Builders for selections and link candidates.

#![allow(dead_code)]

use std::collections::BTreeSet;

use dsgsync::classify::{Language, LinkCandidate};
use dsgsync::selection::{ContentType, Rgb, ScheduleGroup, UserSelection};

/// Builder for `UserSelection` instances.
#[derive(Default)]
pub struct SelectionBuilder {
    selection: UserSelection,
}

impl SelectionBuilder {
    /// An empty selection: nothing is downloaded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content_type: ContentType) -> Self {
        self.selection.content_types.insert(content_type);
        self
    }

    pub fn contents(mut self, types: &[ContentType]) -> Self {
        self.selection.content_types.extend(types.iter().copied());
        self
    }

    /// Restrict a document type to the given languages.
    pub fn languages_for(mut self, content_type: ContentType, langs: &[Language]) -> Self {
        let set: BTreeSet<Language> = langs.iter().copied().collect();
        match content_type {
            ContentType::FullDsg => self.selection.full_dsg_langs = set,
            ContentType::SpecialEditionDsg => self.selection.se_dsg_langs = set,
            ContentType::BibleReading => self.selection.bible_reading_langs = set,
            ContentType::BibleReferences => self.selection.bible_references_langs = set,
            ContentType::Foreword => self.selection.foreword_langs = set,
            other => panic!("{other} has no language restriction"),
        }
        self
    }

    pub fn schedule_group(mut self, group: ScheduleGroup) -> Self {
        self.selection.schedule_groups.insert(group);
        self
    }

    pub fn subgroup(mut self, group: ScheduleGroup, name: &str) -> Self {
        self.selection
            .schedule_subgroups
            .entry(group)
            .or_default()
            .insert(name.to_string());
        self
    }

    pub fn highlight(mut self, name: &str, color: Rgb) -> Self {
        self.selection
            .minister_highlight_colors
            .insert(name.to_string(), color);
        self
    }

    pub fn build(self) -> UserSelection {
        self.selection
    }
}

/// Builder for `LinkCandidate` instances.
pub struct CandidateBuilder {
    candidate: LinkCandidate,
}

impl CandidateBuilder {
    pub fn new(href: &str) -> Self {
        Self {
            candidate: LinkCandidate::new(href),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.candidate.text = text.to_string();
        self
    }

    pub fn header(mut self, header: &str) -> Self {
        self.candidate.header = header.to_string();
        self
    }

    /// Listing text of the month page the link was found on.
    pub fn month(mut self, month_year: &str) -> Self {
        self.candidate.month_year_hint = Some(month_year.to_string());
        self
    }

    pub fn build(self) -> LinkCandidate {
        self.candidate
    }
}
