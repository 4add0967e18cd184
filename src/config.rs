//! Configuration for Quill
//!
//! Settings are read from `<config dir>/quill/quill.toml`. A missing
//! file means defaults; every field is individually defaulted so a
//! partial file is fine.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Quill configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Lines of context captured above the cursor
    pub context_lines_before: usize,

    /// Lines of context captured below the cursor
    pub context_lines_after: usize,

    /// Number of suggestion slots panels are asked to fill (clamped 1..=5)
    pub suggestion_count: usize,

    /// Maximum rendered lines for the inline preview annotation
    pub preview_max_lines: usize,

    /// Pause after a preview-cycle signal before re-reading preview state.
    /// A tunable heuristic, not a synchronization guarantee.
    pub cycle_delay_ms: u64,

    /// Interval of the periodic idle tick (snapshot + preview refresh)
    pub idle_tick_ms: u64,

    /// Model used by panels when no override artifact exists
    pub default_model: Option<String>,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            context_lines_before: 50,
            context_lines_after: 10,
            suggestion_count: 3,
            preview_max_lines: 6,
            cycle_delay_ms: 300,
            idle_tick_ms: 2000,
            default_model: None,
        }
    }
}

impl QuillConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quill").join("quill.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path; missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Suggestion count with the panel contract's 1..=5 bound applied
    pub fn clamped_suggestion_count(&self) -> usize {
        self.suggestion_count.clamp(1, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert_eq!(config.context_lines_before, 50);
        assert_eq!(config.context_lines_after, 10);
        assert_eq!(config.suggestion_count, 3);
        assert_eq!(config.cycle_delay_ms, 300);
        assert!(config.default_model.is_none());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        let config = QuillConfig::load_from(&temp.path().join("quill.toml")).unwrap();
        assert_eq!(config.suggestion_count, 3);
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quill.toml");
        fs::write(&path, "suggestion_count = 5\ndefault_model = \"sonnet\"\n").unwrap();

        let config = QuillConfig::load_from(&path).unwrap();
        assert_eq!(config.suggestion_count, 5);
        assert_eq!(config.default_model.as_deref(), Some("sonnet"));
        // Untouched fields keep defaults
        assert_eq!(config.context_lines_before, 50);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quill.toml");
        fs::write(&path, "suggestion_count = [").unwrap();
        assert!(QuillConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_suggestion_count_clamp() {
        let config = QuillConfig {
            suggestion_count: 99,
            ..Default::default()
        };
        assert_eq!(config.clamped_suggestion_count(), 5);

        let config = QuillConfig {
            suggestion_count: 0,
            ..Default::default()
        };
        assert_eq!(config.clamped_suggestion_count(), 1);
    }
}
