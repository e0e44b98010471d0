//! Locating downloaded schedule PDFs under the DSG root.

use std::path::{Component, Path, PathBuf};

use chrono::{Datelike, Month, NaiveDate};
use walkdir::WalkDir;

use crate::classify::Category;
use crate::error::StorageError;

const EXCLUDED_FOLDERS: [&str; 2] = ["youth", "seniors"];

/// Every `<base>/<20YY>/<Month>/Schedules/*.pdf`, sorted by path.
pub fn find_schedule_files<P: AsRef<Path>>(base_dir: P) -> Result<Vec<PathBuf>, StorageError> {
    let base_dir = base_dir.as_ref();
    if !base_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base_dir).min_depth(4).max_depth(4) {
        let entry = entry.map_err(|e| StorageError::ScanDirectory {
            path: base_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && schedule_parts(base_dir, path).is_some() {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Schedule files for the month containing `today` and the one after it.
pub fn schedule_files_for<P: AsRef<Path>>(
    base_dir: P,
    today: NaiveDate,
) -> Result<Vec<PathBuf>, StorageError> {
    let base_dir = base_dir.as_ref();
    let wanted = current_and_next_month(today);

    Ok(find_schedule_files(base_dir)?
        .into_iter()
        .filter(|path| {
            schedule_parts(base_dir, path).is_some_and(|(year, month)| {
                wanted
                    .iter()
                    .any(|(m, y)| *y == year && m.name().eq_ignore_ascii_case(&month))
            })
        })
        .collect())
}

/// The month containing `today` and the next one, rolling December over
/// into January of the following year.
pub fn current_and_next_month(today: NaiveDate) -> [(Month, i32); 2] {
    let current = Month::try_from(today.month() as u8).unwrap_or(Month::January);
    let next_year = if current == Month::December {
        today.year() + 1
    } else {
        today.year()
    };
    [(current, today.year()), (current.succ(), next_year)]
}

/// True when any path component is a youth or seniors folder.
pub fn is_excluded_schedule_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().components().any(|c| match c {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            EXCLUDED_FOLDERS.iter().any(|x| name.eq_ignore_ascii_case(x))
        }
        _ => false,
    })
}

// (year, month folder name) when `path` has the schedule layout below
// `base_dir`.
fn schedule_parts(base_dir: &Path, path: &Path) -> Option<(i32, String)> {
    let rel = path.strip_prefix(base_dir).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let [year, month, folder, file] = parts.as_slice() else {
        return None;
    };

    let is_year = year.len() == 4 && year.starts_with("20") && year.chars().all(|c| c.is_ascii_digit());
    let is_pdf = Path::new(file)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_year && folder == Category::Schedules.folder_name() && is_pdf {
        Some((year.parse().ok()?, month.clone()))
    } else {
        None
    }
}
