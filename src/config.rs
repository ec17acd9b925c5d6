use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::page::PageOptions;
use crate::reading::DEFAULT_WORDS_PER_MINUTE;
use crate::render::RenderOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub render: RenderOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Reading speed used for read-time estimates
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
        }
    }
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "warn", "blogdoc=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/blogdoc/config.toml
    /// - Linux: ~/.config/blogdoc/config.toml
    /// - Windows: %APPDATA%/blogdoc/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blogdoc").join("config.toml"))
    }

    /// Load config from file, or return default if it is missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save config to the platform config path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write atomically: a temp file in the same directory is renamed over the target
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)?;
        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(contents.as_bytes())?;
        file.persist(path).map_err(|err| Error::Io(err.error))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Page options derived from the reading and render sections
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            render: self.render.clone(),
            words_per_minute: self.reading.words_per_minute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.logging.level, "warn");
        assert!(config.render.classes);
        assert_eq!(config.render.link_target, "_blank");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[reading]\nwords_per_minute = 250\n").unwrap();
        assert_eq!(config.reading.words_per_minute, 250);
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.page_options().words_per_minute, 250);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.render.classes = false;
        config.logging.level = "blogdoc=debug".into();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reading = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::ConfigParse(_))));
    }
}
