//! Signal detection over hrefs, file names and section headers.
//!
//! Every signal is an independent keyword test; a link can carry any
//! combination of them (a Full DSG can also be a bible-reference insert).

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::href::{decode, Href};
use crate::error::ConfigError;

static RE_SE_DSG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^a-z])se[\s_-]dsg").unwrap());

/// Languages the portal publishes in, in label priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Russian,
        Language::Spanish,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Spanish => "es",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Spanish => "Spanish",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(name))
    }

    /// Accepts either a full name or a two-letter code.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::from_name(label).or_else(|| Self::from_code(label))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Language {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::parse(&value).ok_or(ConfigError::UnknownLabel {
            kind: "language",
            value,
        })
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.name().to_string()
    }
}

/// Signal bag derived from a link. Pure function of its input strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    /// Languages found either as bounded two-letter codes or as full names.
    pub language_codes: BTreeSet<Language>,
    /// Languages found spelled out in full; drives the filename label.
    pub language_names: BTreeSet<Language>,
    pub audio: bool,
    pub transcript: bool,
    pub bible_reading: bool,
    pub bible_references: bool,
    pub full_dsg: bool,
    pub special_edition_dsg: bool,
    pub foreword: bool,
    pub youth: bool,
    pub children: bool,
    pub senior: bool,
    pub nacc: bool,
    pub serving_schedule: bool,
    /// Link sits under a Divine Service Prep listing.
    pub dsg_context: bool,
}

impl Flags {
    pub fn has_language(&self, lang: Language) -> bool {
        self.language_codes.contains(&lang)
    }

    /// First spelled-out language in priority order, used in filenames.
    pub fn label_language(&self) -> Option<Language> {
        self.language_names.iter().next().copied()
    }

    /// True when the link is any of the special DSG products rather than
    /// the plain weekly document.
    pub fn is_special_type(&self) -> bool {
        self.audio
            || self.transcript
            || self.bible_references
            || self.bible_reading
            || self.full_dsg
            || self.special_edition_dsg
            || self.foreword
            || self.youth
            || self.children
    }
}

/// Derives the signal bag for one link.
///
/// `href` may be percent-encoded and absolute or relative; `filename` is the
/// link's file name (usually the last href segment); `header_text` is the
/// nearest section heading and may be empty.
pub fn detect(href: &str, filename: &str, header_text: &str) -> Flags {
    let location = Href::new(href).location().to_string();
    let file = decode(filename).to_lowercase();
    let header = header_text.trim().to_lowercase();

    let in_link = |needle: &str| location.contains(needle) || file.contains(needle);
    let in_header = |needle: &str| header.contains(needle);

    let mut language_codes = BTreeSet::new();
    let mut language_names = BTreeSet::new();
    collect_bounded_codes(&location, &mut language_codes);
    collect_bounded_codes(&file, &mut language_codes);
    for lang in Language::ALL {
        let name = lang.name().to_lowercase();
        if in_link(&name) {
            language_names.insert(lang);
            language_codes.insert(lang);
        }
    }

    Flags {
        language_codes,
        language_names,
        audio: in_link("audio"),
        transcript: in_link("transcript"),
        bible_reading: ["bible-reading", "bible reading", "bible_reading"]
            .into_iter()
            .any(|k| in_link(k)),
        bible_references: (location.contains("bible") && location.contains("reference"))
            || file.contains("bible-references")
            || file.contains("bible_references"),
        full_dsg: (location.contains("full") && location.contains("dsg"))
            || file.contains("full-dsg"),
        special_edition_dsg: in_link("special edition")
            || RE_SE_DSG.is_match(&location)
            || RE_SE_DSG.is_match(&file),
        foreword: in_link("foreword") || in_header("foreword") || in_header("forward"),
        youth: in_link("youth") || in_header("youth"),
        children: location.contains("children")
            || file.contains("child")
            || in_header("children"),
        senior: in_link("senior") || in_header("senior"),
        nacc: location.contains("nacc") || in_header("nacc"),
        serving_schedule: location.contains("serving") && location.contains("schedule"),
        // Portal sites live under /sites/dsg/, so "dsg" only counts in the
        // file name.
        dsg_context: in_link("divine")
            || file.contains("dsg")
            || in_header("divine")
            || in_header("dsg"),
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | '/')
}

/// Two-letter codes count only when a separator precedes them and a
/// separator or the end of the string follows.
fn collect_bounded_codes(text: &str, codes: &mut BTreeSet<Language>) {
    for token in text.split(is_separator).skip(1) {
        if let Some(lang) = Language::from_code(token) {
            codes.insert(lang);
        }
    }
}
