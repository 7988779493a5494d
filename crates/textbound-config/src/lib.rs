//! textbound configuration system
//!
//! This crate provides centralized configuration for textbound, loading
//! settings from `textbound.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "textbound.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure for textbound
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TextboundConfig {
    /// Locale settings
    pub locale: LocaleConfig,
    /// Segmentation defaults
    pub segmentation: SegmentationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale name such as `ja_JP.UTF-8`. When unset the locale is taken
    /// from `LC_ALL`, `LC_CTYPE` or `LANG`.
    pub name: Option<String>,
}

/// Segmentation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Boundary kind: `character`, `word`, `sentence` or `line`
    pub boundary: String,
    /// Mask expression, e.g. `word_letter|word_number` or `0xF00`
    pub mask: Option<String>,
    /// Merge masked-out sub-tokens into the enclosing token
    pub full_select: bool,
    /// Join runs of ideographs (or hiragana) into a single word
    pub merge_cjk_runs: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter directive, e.g. `textbound=debug`
    pub filter: Option<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            boundary: "word".to_string(),
            mask: None,
            full_select: false,
            merge_cjk_runs: true,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}

impl TextboundConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents do not match the schema.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `textbound.toml` in the current directory
    /// or return the default configuration if the file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|key| std::env::var(key).ok());
    }

    /// Merge configuration with overrides from an arbitrary variable lookup.
    pub fn merge_with_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TEXTBOUND_LOCALE") {
            self.locale.name = Some(name);
        }

        if let Some(boundary) = lookup("TEXTBOUND_BOUNDARY") {
            self.segmentation.boundary = boundary;
        }
        if let Some(mask) = lookup("TEXTBOUND_MASK") {
            self.segmentation.mask = Some(mask);
        }
        if let Some(val) = lookup("TEXTBOUND_FULL_SELECT") {
            self.segmentation.full_select = parse_flag(&val);
        }
        if let Some(val) = lookup("TEXTBOUND_MERGE_CJK_RUNS") {
            self.segmentation.merge_cjk_runs = parse_flag(&val);
        }

        if let Some(filter) = lookup("TEXTBOUND_LOG") {
            self.logging.filter = Some(filter);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from `textbound.toml` (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TextboundConfig::default();
        assert_eq!(config.segmentation.boundary, "word");
        assert!(config.segmentation.mask.is_none());
        assert!(!config.segmentation.full_select);
        assert!(config.segmentation.merge_cjk_runs);
        assert!(config.locale.name.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = TextboundConfig::default();
        config.segmentation.mask = Some("word_letters".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: TextboundConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.segmentation.mask.as_deref(), Some("word_letters"));
        assert!(parsed.segmentation.merge_cjk_runs);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: TextboundConfig = toml::from_str(
            r#"
            [segmentation]
            boundary = "sentence"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.segmentation.boundary, "sentence");
        assert!(parsed.segmentation.merge_cjk_runs);
        assert!(parsed.logging.filter.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[locale]\nname = \"ja_JP.UTF-8\"\n\n[segmentation]\nboundary = \"line\"\nfull_select = true"
        )
        .unwrap();

        let config = TextboundConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.locale.name.as_deref(), Some("ja_JP.UTF-8"));
        assert_eq!(config.segmentation.boundary, "line");
        assert!(config.segmentation.full_select);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextboundConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[segmentation]\nfull_select = \"maybe\"").unwrap();
        let err = TextboundConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merge_with_vars() {
        let vars: HashMap<&str, &str> = [
            ("TEXTBOUND_LOCALE", "fr_FR.ISO-8859-1"),
            ("TEXTBOUND_BOUNDARY", "sentence"),
            ("TEXTBOUND_MASK", "sentence_term"),
            ("TEXTBOUND_FULL_SELECT", "true"),
            ("TEXTBOUND_MERGE_CJK_RUNS", "0"),
            ("TEXTBOUND_LOG", "textbound=trace"),
        ]
        .into_iter()
        .collect();

        let mut config = TextboundConfig::default();
        config.merge_with_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.locale.name.as_deref(), Some("fr_FR.ISO-8859-1"));
        assert_eq!(config.segmentation.boundary, "sentence");
        assert_eq!(config.segmentation.mask.as_deref(), Some("sentence_term"));
        assert!(config.segmentation.full_select);
        assert!(!config.segmentation.merge_cjk_runs);
        assert_eq!(config.logging.filter.as_deref(), Some("textbound=trace"));
    }

    #[test]
    fn test_merge_without_vars_is_noop() {
        let mut config = TextboundConfig::default();
        config.merge_with_vars(|_| None);
        assert_eq!(config.segmentation.boundary, "word");
        assert!(config.locale.name.is_none());
    }
}
