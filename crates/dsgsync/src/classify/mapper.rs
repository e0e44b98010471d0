//! Destination mapping: detect, resolve, classify and name in one pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::category::{classify_detailed, Category, Classification};
use super::date::{resolve, ResolvedDate};
use super::filename::{compose_with_source, with_extension};
use super::flags::{detect, Flags};
use super::href::Href;

/// One discovered hyperlink with its page context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkCandidate {
    pub href: String,
    pub text: String,
    pub header: String,
    pub month_year_hint: Option<String>,
}

impl LinkCandidate {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_month_year_hint(mut self, hint: impl Into<String>) -> Self {
        self.month_year_hint = Some(hint.into());
        self
    }

    pub fn has_href(&self) -> bool {
        !self.href.trim().is_empty()
    }

    pub fn flags(&self) -> Flags {
        let href = Href::new(&self.href);
        detect(&self.href, href.file_name(), &self.header)
    }
}

/// Folder segments below the base directory plus the final filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationPath {
    pub base_dir: PathBuf,
    pub segments: Vec<String>,
    pub filename: String,
}

impl DestinationPath {
    pub fn folder(&self) -> PathBuf {
        let mut folder = self.base_dir.clone();
        folder.extend(&self.segments);
        folder
    }

    pub fn file_path(&self) -> PathBuf {
        self.folder().join(&self.filename)
    }

    /// Path relative to the base directory, for display.
    pub fn relative(&self) -> PathBuf {
        let mut rel: PathBuf = self.segments.iter().collect();
        rel.push(&self.filename);
        rel
    }
}

/// Every intermediate result of mapping one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub flags: Flags,
    pub date: ResolvedDate,
    pub classification: Classification,
    pub destination: DestinationPath,
}

impl Mapping {
    pub fn category(&self) -> Category {
        self.classification.category
    }
}

#[derive(Debug, Clone)]
pub struct DestinationMapper {
    base_dir: PathBuf,
}

impl DestinationMapper {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn map(&self, candidate: &LinkCandidate) -> DestinationPath {
        self.map_detailed(candidate).destination
    }

    pub fn map_detailed(&self, candidate: &LinkCandidate) -> Mapping {
        let href = Href::new(&candidate.href);
        let flags = detect(&candidate.href, href.file_name(), &candidate.header);
        let date = resolve(
            &candidate.href,
            &candidate.text,
            &candidate.header,
            candidate.month_year_hint.as_deref(),
        );
        let classification = classify_detailed(&flags, &candidate.header);

        let stem = compose_with_source(
            classification.category,
            &date,
            &flags,
            &candidate.text,
            href.stem(),
        );
        let filename = with_extension(&stem, href.extension());

        let mut segments = Vec::with_capacity(3);
        if let Some(year) = date.year() {
            segments.push(year.to_string());
        }
        if let Some(month) = date.month_name() {
            segments.push(month.to_string());
        }
        segments.push(classification.category.folder_name().to_string());

        Mapping {
            flags,
            date,
            classification,
            destination: DestinationPath {
                base_dir: self.base_dir.clone(),
                segments,
                filename,
            },
        }
    }
}

/// Maps a candidate below `base_dir`.
pub fn map<P: AsRef<Path>>(candidate: &LinkCandidate, base_dir: P) -> DestinationPath {
    DestinationMapper::new(base_dir).map(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_dsg_scenario() {
        let candidate = LinkCandidate::new("https://site/English/Full%20DSG/2025-12-07-full-dsg-en.pdf")
            .with_text("December 7")
            .with_header("Divine Service Prep");

        let mapping = DestinationMapper::new("/dsg").map_detailed(&candidate);
        assert!(mapping.flags.full_dsg);
        assert_eq!(mapping.category(), Category::FullDsg);
        assert_eq!(mapping.destination.filename, "December 2025 Full DSG English.pdf");
        assert_eq!(
            mapping.destination.folder(),
            PathBuf::from("/dsg/2025/December/Full DSGs")
        );
    }

    #[test]
    fn test_schedule_scenario() {
        let candidate = LinkCandidate::new("https://site/Schedules/Kitchener-Serving-Schedule.pdf")
            .with_text("Kitchener")
            .with_header("District Serving Schedules")
            .with_month_year_hint("January 2026");

        let dest = map(&candidate, "/dsg");
        assert_eq!(dest.filename, "January 2026 Kitchener Serving Schedule.pdf");
        assert_eq!(dest.segments, vec!["2026", "January", "Schedules"]);
    }

    #[test]
    fn test_unknown_date_gives_shallow_folder() {
        let candidate = LinkCandidate::new("/docs/London.pdf")
            .with_text("London")
            .with_header("Seniors Schedules");

        let dest = map(&candidate, "/dsg");
        assert_eq!(dest.segments, vec!["Seniors"]);
        assert_eq!(dest.file_path(), PathBuf::from("/dsg/Seniors/London Seniors Schedule.pdf"));
        assert_eq!(dest.relative(), PathBuf::from("Seniors/London Seniors Schedule.pdf"));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let candidate = LinkCandidate::new("https://site/Audio/2025-12-14-audio-fr.mp3")
            .with_text("Audio")
            .with_header("Divine Service Prep December 2025");
        let mapper = DestinationMapper::new("/dsg");
        assert_eq!(mapper.map(&candidate), mapper.map(&candidate));
    }

    #[test]
    fn test_filename_never_contains_separator() {
        let candidate = LinkCandidate::new("/x/file.pdf")
            .with_text("North/South")
            .with_header("District Serving Schedules");
        let dest = map(&candidate, "/dsg");
        assert!(!dest.filename.contains('/'));
        assert_eq!(dest.filename, "North-South Serving Schedule.pdf");
    }

    #[test]
    fn test_dot_only_link_text_stays_inside_folder() {
        for text in [".", "..", " .. "] {
            let candidate = LinkCandidate::new("/Schedules/x")
                .with_text(text)
                .with_header("Divine Service Prep");
            let dest = map(&candidate, "/dsg");
            assert_eq!(dest.filename, "Divine Service Prep", "text: {:?}", text);
            assert_eq!(dest.file_path(), PathBuf::from("/dsg/DSG/Divine Service Prep"));
        }
    }

    #[test]
    fn test_empty_href_is_total() {
        let candidate = LinkCandidate::default();
        assert!(!candidate.has_href());
        let dest = map(&candidate, "/dsg");
        assert_eq!(dest.segments, vec!["DSG"]);
        assert_eq!(dest.filename, "Divine Service Prep");
    }
}
