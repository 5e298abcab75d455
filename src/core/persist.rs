/// Story persistence — writing finished stories to timestamped files.

use chrono::{Local, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `YYYYMMDD_HHMMSS`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not create save directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Template file name with its extension removed.
pub fn base_name(template_name: &str) -> &str {
    Path::new(template_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(template_name)
}

/// `<base>_<YYYYMMDD_HHMMSS>.txt` for a template saved at `timestamp`.
pub fn story_file_name(template_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.txt",
        base_name(template_name),
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Write `story` into the freshly created file at `path`. On failure the
/// partial file is removed so a failed save leaves nothing behind.
fn write_or_discard<W: Write>(path: &Path, mut file: W, story: &str) -> Result<(), PersistError> {
    match file.write_all(story.as_bytes()).and_then(|()| file.flush()) {
        Ok(()) => Ok(()),
        Err(source) => {
            drop(file);
            if let Err(e) = fs::remove_file(path) {
                log::warn!("could not remove partial file {}: {}", path.display(), e);
            }
            Err(PersistError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Writes stories into a save directory, one new file per call.
#[derive(Debug, Clone)]
pub struct StoryPersister {
    save_dir: PathBuf,
}

impl StoryPersister {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Save `story` under a name derived from `template_name` and the
    /// current local time.
    pub fn persist(&self, story: &str, template_name: &str) -> Result<PathBuf, PersistError> {
        self.persist_at(story, template_name, Local::now().naive_local())
    }

    /// Save `story` as if at `timestamp`.
    ///
    /// Existing files are never overwritten. When the timestamped name is
    /// already taken, `_2`, `_3`, … is appended to the stem until a free
    /// name is found.
    pub fn persist_at(
        &self,
        story: &str,
        template_name: &str,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.save_dir).map_err(|source| PersistError::CreateDir {
            path: self.save_dir.clone(),
            source,
        })?;

        let stem = format!(
            "{}_{}",
            base_name(template_name),
            timestamp.format(TIMESTAMP_FORMAT)
        );

        let mut attempt = 1u32;
        loop {
            let file_name = if attempt == 1 {
                format!("{}.txt", stem)
            } else {
                format!("{}_{}.txt", stem, attempt)
            };
            let path = self.save_dir.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(&path, file, story)?;
                    log::info!("saved story to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying next suffix", path.display());
                    attempt += 1;
                }
                Err(source) => return Err(PersistError::Write { path, source }),
            }
        }
    }
}
