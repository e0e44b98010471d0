use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::classify::DestinationPath;
use crate::error::StorageError;

/// What happened to a store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum StoreOutcome {
    Saved(PathBuf),
    /// The file was already there and overwriting is off.
    Skipped(PathBuf),
}

impl StoreOutcome {
    pub fn path(&self) -> &Path {
        match self {
            StoreOutcome::Saved(path) | StoreOutcome::Skipped(path) => path,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, StoreOutcome::Saved(_))
    }
}

/// Writes downloaded documents to their mapped destinations.
pub struct FileStorage {
    overwrite: bool,
}

impl FileStorage {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// True when the destination file is already on disk.
    pub fn exists(&self, destination: &DestinationPath) -> bool {
        std::fs::symlink_metadata(destination.file_path()).is_ok()
    }

    pub fn store(&self, destination: &DestinationPath, content: &[u8]) -> Result<StoreOutcome, StorageError> {
        let dir_path = destination.folder();
        ensure_directory(&dir_path)?;
        let file_path = dir_path.join(&destination.filename);

        if self.overwrite {
            write_replacing(&file_path, content)?;
            info!("Saved {}", destination.filename);
            return Ok(StoreOutcome::Saved(file_path));
        }

        // create_new fails atomically when the file exists, so two runs
        // racing for the same destination never both write it.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
        {
            Ok(mut file) => {
                if let Err(e) = file.write_all(content).and_then(|()| file.flush()) {
                    drop(file);
                    remove_partial(&file_path);
                    return Err(StorageError::WriteFile {
                        path: file_path,
                        source: e,
                    });
                }
                info!("Saved {}", destination.filename);
                Ok(StoreOutcome::Saved(file_path))
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("Skipped existing {}", file_path.display());
                Ok(StoreOutcome::Skipped(file_path))
            }
            Err(e) => Err(StorageError::WriteFile {
                path: file_path,
                source: e,
            }),
        }
    }
}

fn ensure_directory(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_replacing(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    std::fs::write(path, content).map_err(|e| {
        remove_partial(path);
        StorageError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

fn remove_partial(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        debug!("Could not remove partial file {}: {}", path.display(), e);
    }
}
