//! Year / month / category folder tree under the DSG root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Month;
use log::debug;
use serde::Serialize;

use crate::classify::date::parse_month_year;
use crate::classify::{Category, DestinationPath};
use crate::error::StorageError;

/// Folders touched by an ensure call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnsureReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
}

impl EnsureReport {
    pub fn merge(&mut self, other: EnsureReport) {
        self.created.extend(other.created);
        self.existing.extend(other.existing);
    }

    pub fn total(&self) -> usize {
        self.created.len() + self.existing.len()
    }
}

pub struct FolderEnsurer {
    base_dir: PathBuf,
}

impl FolderEnsurer {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn ensure_years(&self, years: &[i32]) -> Result<EnsureReport, StorageError> {
        let mut report = EnsureReport::default();
        for year in years {
            self.ensure(&self.base_dir.join(year.to_string()), &mut report)?;
        }
        Ok(report)
    }

    pub fn ensure_months(&self, pairs: &[(Month, i32)]) -> Result<EnsureReport, StorageError> {
        let mut report = EnsureReport::default();
        for (month, year) in pairs {
            self.ensure(&self.month_dir(*month, *year), &mut report)?;
        }
        Ok(report)
    }

    pub fn ensure_subfolders(
        &self,
        pairs: &[(Month, i32)],
        categories: &[Category],
    ) -> Result<EnsureReport, StorageError> {
        let mut report = EnsureReport::default();
        for (month, year) in pairs {
            let month_dir = self.month_dir(*month, *year);
            for category in categories {
                self.ensure(&month_dir.join(category.folder_name()), &mut report)?;
            }
        }
        Ok(report)
    }

    /// Creates the folder a mapped document will be written to.
    pub fn ensure_destination(&self, destination: &DestinationPath) -> Result<EnsureReport, StorageError> {
        let mut report = EnsureReport::default();
        self.ensure(&destination.folder(), &mut report)?;
        Ok(report)
    }

    /// Years, months and subfolders for every "Month Year" in the listing
    /// texts, in one pass.
    pub fn ensure_listing<S: AsRef<str>>(
        &self,
        texts: &[S],
        categories: &[Category],
    ) -> Result<EnsureReport, StorageError> {
        let years: Vec<i32> = years_in(texts).into_iter().collect();
        let pairs = month_year_pairs_in(texts);

        let mut report = self.ensure_years(&years)?;
        report.merge(self.ensure_months(&pairs)?);
        if !categories.is_empty() {
            report.merge(self.ensure_subfolders(&pairs, categories)?);
        }
        Ok(report)
    }

    fn month_dir(&self, month: Month, year: i32) -> PathBuf {
        self.base_dir.join(year.to_string()).join(month.name())
    }

    fn ensure(&self, path: &Path, report: &mut EnsureReport) -> Result<(), StorageError> {
        if path.is_dir() {
            debug!("Folder exists: {}", path.display());
            report.existing.push(path.to_path_buf());
            return Ok(());
        }

        match std::fs::create_dir_all(path) {
            Ok(()) => {
                debug!("Created folder: {}", path.display());
                report.created.push(path.to_path_buf());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => {
                report.existing.push(path.to_path_buf());
                Ok(())
            }
            Err(e) => Err(StorageError::CreateDirectory {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// Distinct four-digit years mentioned in listing texts.
pub fn years_in<S: AsRef<str>>(texts: &[S]) -> BTreeSet<i32> {
    texts
        .iter()
        .filter_map(|t| first_year(t.as_ref()))
        .collect()
}

/// `(Month, Year)` pairs from texts like "December 2025", first occurrence
/// order, without duplicates.
pub fn month_year_pairs_in<S: AsRef<str>>(texts: &[S]) -> Vec<(Month, i32)> {
    let mut pairs = Vec::new();
    for text in texts {
        if let Some(pair) = parse_month_year(text.as_ref()) {
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

fn first_year(text: &str) -> Option<i32> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|token| token.len() == 4 && token.starts_with("20"))
        .and_then(|token| token.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_years_and_pairs_from_texts() {
        let texts = ["December 2025", "January 2026", "Archive", "December 2025"];
        assert_eq!(years_in(&texts), BTreeSet::from([2025, 2026]));
        assert_eq!(
            month_year_pairs_in(&texts),
            vec![(Month::December, 2025), (Month::January, 2026)]
        );
    }

    #[test]
    fn test_year_token_must_be_four_digits() {
        assert_eq!(first_year("Room 20251"), None);
        assert_eq!(first_year("FY-2026/27"), Some(2026));
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let ensurer = FolderEnsurer::new(temp_dir.path());
        let pairs = [(Month::December, 2025)];
        let categories = [Category::Dsg, Category::Schedules];

        let first = ensurer.ensure_subfolders(&pairs, &categories).unwrap();
        assert_eq!(first.created.len(), 2);
        assert!(first.existing.is_empty());
        assert!(temp_dir.path().join("2025/December/DSG").is_dir());

        let second = ensurer.ensure_subfolders(&pairs, &categories).unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), 2);
    }

    #[test]
    fn test_ensure_listing_builds_tree() {
        let temp_dir = TempDir::new().unwrap();
        let ensurer = FolderEnsurer::new(temp_dir.path());

        let report = ensurer
            .ensure_listing(&["November 2025", "December 2025"], &[Category::FullDsg])
            .unwrap();

        // 1 year + 2 months + 2 subfolders
        assert_eq!(report.total(), 5);
        assert!(temp_dir.path().join("2025/November/Full DSGs").is_dir());
        assert!(temp_dir.path().join("2025/December/Full DSGs").is_dir());
    }

    #[test]
    fn test_ensure_destination() {
        let temp_dir = TempDir::new().unwrap();
        let ensurer = FolderEnsurer::new(temp_dir.path());
        let destination = DestinationPath {
            base_dir: temp_dir.path().to_path_buf(),
            segments: vec!["Seniors".into()],
            filename: "London Seniors Schedule.pdf".into(),
        };

        let report = ensurer.ensure_destination(&destination).unwrap();
        assert_eq!(report.created, vec![temp_dir.path().join("Seniors")]);
    }

    #[test]
    fn test_file_in_the_way_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("2025"), b"not a folder").unwrap();
        let ensurer = FolderEnsurer::new(temp_dir.path());

        let result = ensurer.ensure_years(&[2025]);
        assert!(matches!(result, Err(StorageError::CreateDirectory { .. })));
    }
}
