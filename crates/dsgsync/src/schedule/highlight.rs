use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::error::ScheduleError;
use crate::sanitize::redact_path;
use crate::selection::{Rgb, UserSelection};

const EXCLUDED_MARKERS: [&str; 3] = ["youth", "senior", "nacc calendar"];

/// Marks minister names inside a schedule PDF.
pub trait Highlighter {
    /// Highlights every occurrence of each name in `colors` and returns the
    /// number of marks placed. Zero marks leaves the file untouched.
    fn highlight(
        &self,
        path: &Path,
        colors: &BTreeMap<String, Rgb>,
        opacity: f32,
    ) -> Result<usize, ScheduleError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightReport {
    pub highlighted: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub excluded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Youth, seniors and NACC calendar files are never highlighted. Only the
/// part of `path` below `base_dir` is inspected.
pub fn is_highlight_candidate(base_dir: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    !relative.components().any(|c| match c {
        Component::Normal(name) => {
            let name = name.to_string_lossy().to_lowercase();
            EXCLUDED_MARKERS.iter().any(|m| name.contains(m))
        }
        _ => false,
    })
}

pub fn highlight_schedule_files(
    base_dir: &Path,
    files: &[PathBuf],
    selection: &UserSelection,
    highlighter: &dyn Highlighter,
) -> HighlightReport {
    let mut report = HighlightReport::default();
    let colors: BTreeMap<String, Rgb> = selection
        .minister_highlight_colors
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, rgb)| (name.trim().to_string(), *rgb))
        .collect();

    if colors.is_empty() {
        info!("No minister colours configured, skipping highlighting");
        return report;
    }

    for path in files {
        if !is_highlight_candidate(base_dir, path) {
            report.excluded.push(path.clone());
            continue;
        }

        match highlighter.highlight(path, &colors, selection.highlight_opacity) {
            Ok(0) => report.unchanged.push(path.clone()),
            Ok(marks) => {
                info!("Highlighted {} name(s) in {}", marks, redact_path(path));
                report.highlighted.push(path.clone());
            }
            Err(e) => {
                warn!("Highlighting {} failed: {}", redact_path(path), e);
                report.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHighlighter {
        seen: RefCell<Vec<(PathBuf, Vec<String>, f32)>>,
    }

    impl Highlighter for RecordingHighlighter {
        fn highlight(
            &self,
            path: &Path,
            colors: &BTreeMap<String, Rgb>,
            opacity: f32,
        ) -> Result<usize, ScheduleError> {
            self.seen.borrow_mut().push((
                path.to_path_buf(),
                colors.keys().cloned().collect(),
                opacity,
            ));
            if path.ends_with("broken.pdf") {
                return Err(ScheduleError::Highlight {
                    path: path.to_path_buf(),
                    reason: "encrypted".to_string(),
                });
            }
            Ok(if path.ends_with("empty.pdf") { 0 } else { 2 })
        }
    }

    fn selection_with_colors() -> UserSelection {
        let mut selection = UserSelection::default();
        selection
            .minister_highlight_colors
            .insert(" Dc. M. Smith ".to_string(), Rgb(1.0, 1.0, 0.0));
        selection.highlight_opacity = 0.3;
        selection
    }

    #[test]
    fn test_highlights_only_eligible_files() {
        let files = vec![
            PathBuf::from("/dsg/2026/January/Schedules/January 2026 Kitchener Serving Schedule.pdf"),
            PathBuf::from("/dsg/2026/January/Schedules/January 2026 Youth Schedule.pdf"),
            PathBuf::from("/dsg/2026/January/Schedules/January 2026 NACC Calendar.pdf"),
            PathBuf::from("/dsg/2026/January/Schedules/empty.pdf"),
            PathBuf::from("/dsg/2026/January/Schedules/broken.pdf"),
        ];
        let highlighter = RecordingHighlighter::default();

        let report = highlight_schedule_files(Path::new("/dsg"), &files, &selection_with_colors(), &highlighter);

        assert_eq!(report.highlighted, vec![files[0].clone()]);
        assert_eq!(report.excluded.len(), 2);
        assert_eq!(report.unchanged, vec![files[3].clone()]);
        assert_eq!(report.failed.len(), 1);

        let seen = highlighter.seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].1, vec!["Dc. M. Smith".to_string()]);
        assert_eq!(seen[0].2, 0.3);
    }

    #[test]
    fn test_no_colors_does_nothing() {
        let files = vec![PathBuf::from("/dsg/Kitchener.pdf")];
        let highlighter = RecordingHighlighter::default();

        let report = highlight_schedule_files(Path::new("/dsg"), &files, &UserSelection::default(), &highlighter);

        assert_eq!(report, HighlightReport::default());
        assert!(highlighter.seen.borrow().is_empty());
    }

    #[test]
    fn test_is_highlight_candidate() {
        let base = Path::new("/a");
        assert!(is_highlight_candidate(base, Path::new("/a/London Serving Schedule.pdf")));
        assert!(!is_highlight_candidate(base, Path::new("/a/Seniors Schedule.pdf")));
        assert!(!is_highlight_candidate(base, Path::new("/a/nacc calendar 2026.pdf")));
        assert!(!is_highlight_candidate(base, Path::new("/a/2026/January/Youth/Ontario.pdf")));
    }

    #[test]
    fn test_base_dir_name_does_not_exclude() {
        let base = Path::new("/home/youth-leader/Senior Ministers/DSGs");
        let file = base.join("2026/January/Schedules/January 2026 Kitchener Serving Schedule.pdf");
        assert!(is_highlight_candidate(base, &file));

        let highlighter = RecordingHighlighter::default();
        let report = highlight_schedule_files(base, &[file.clone()], &selection_with_colors(), &highlighter);
        assert_eq!(report.highlighted, vec![file]);
    }
}
