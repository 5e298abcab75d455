/// Runtime configuration, read from an optional RON file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::filler::Emphasis;
use crate::core::library::TemplateLibrary;
use crate::core::persist::StoryPersister;
use crate::core::validation::{Rule, ValidationRules};

/// Looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "madlib.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub templates_dir: PathBuf,
    pub save_dir: PathBuf,
    /// Template file extensions, without the dot.
    pub extensions: Vec<String>,
    pub emphasis: Emphasis,
    /// Extra validation rules by placeholder name; these override built-ins.
    pub rules: HashMap<String, Rule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            save_dir: PathBuf::from("saved_stories"),
            extensions: vec!["txt".to_string()],
            emphasis: Emphasis::default(),
            rules: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Config, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            log::debug!("loading config from {}", path.display());
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn library(&self) -> TemplateLibrary {
        TemplateLibrary::new(&self.templates_dir, &self.extensions)
    }

    pub fn persister(&self) -> StoryPersister {
        StoryPersister::new(&self.save_dir)
    }

    /// Built-in rules plus the configured extras.
    pub fn validation_rules(&self) -> ValidationRules {
        let mut rules = ValidationRules::default();
        rules.extend(self.rules.clone());
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_fixed_dirs() {
        let c = Config::default();
        assert_eq!(c.templates_dir, PathBuf::from("templates"));
        assert_eq!(c.save_dir, PathBuf::from("saved_stories"));
        assert_eq!(c.extensions, vec!["txt".to_string()]);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let c = Config::parse_ron(r#"(save_dir: "out")"#).unwrap();
        assert_eq!(c.save_dir, PathBuf::from("out"));
        assert_eq!(c.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn rules_from_ron() {
        let c = Config::parse_ron(
            r#"(
                emphasis: (open: "*", close: "*"),
                rules: { "adverb": Suffix("ly"), "age": Digits },
            )"#,
        )
        .unwrap();
        assert_eq!(c.emphasis.open, "*");
        let rules = c.validation_rules();
        assert!(rules.validate("slowly", "Adverb"));
        assert!(!rules.validate("slow", "adverb"));
        assert!(!rules.validate("old", "age"));
        // Built-ins survive
        assert!(!rules.validate("run", "verb ending in -ing"));
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(Config::parse_ron("(save_dir: ").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let c = Config::load_or_default(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"(extensions: ["txt", "story"])"#).unwrap();
        let c = Config::load_or_default(&path).unwrap();
        assert_eq!(c.extensions.len(), 2);
    }
}
