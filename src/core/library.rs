/// Template library — discovering and loading template files from a directory.

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::template::Template;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no templates found in '{0}'")]
    NoTemplates(PathBuf),
    #[error("could not read template '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A directory of template files with recognized extensions.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl TemplateLibrary {
    pub fn new(dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_template(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| self.extensions.iter().any(|e| *e == ext.to_lowercase()))
                .unwrap_or(false)
    }

    /// Template file names, sorted.
    ///
    /// A missing or unreadable directory counts as having no templates.
    pub fn list(&self) -> Result<Vec<String>, LibraryError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("cannot read template dir {}: {}", self.dir.display(), e);
                return Err(LibraryError::NoTemplates(self.dir.clone()));
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| self.is_template(path))
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
            })
            .collect();

        if names.is_empty() {
            return Err(LibraryError::NoTemplates(self.dir.clone()));
        }

        names.sort();
        log::debug!("found {} templates in {}", names.len(), self.dir.display());
        Ok(names)
    }

    /// Read and parse a template by file name.
    pub fn load(&self, name: &str) -> Result<Template, LibraryError> {
        let path = self.dir.join(name);
        let contents = std::fs::read_to_string(&path).map_err(|source| LibraryError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Template::parse(&contents).with_name(name))
    }

    /// Pick a template name uniformly at random.
    pub fn choose_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, LibraryError> {
        let names = self.list()?;
        names
            .choose(rng)
            .cloned()
            .ok_or_else(|| LibraryError::NoTemplates(self.dir.clone()))
    }
}
