//! TOML detector-parameter files.
//!
//! Instead of repeating detector flags, users can keep settings in a file:
//!
//! ```toml
//! # detectors.toml
//! [detectors]
//! sag_threshold = 0.85
//! swell_threshold = 1.15
//! rms_window = 64
//! saturation_window = 8
//! frequency_threshold = 0.5
//! expected_frequency = 50.0
//! ```
//!
//! Omitted keys keep the documented defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use comtrade_analyzer::DetectorConfig;

/// Root configuration structure for detector TOML files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Detector parameter overrides.
    #[serde(default)]
    pub detectors: DetectorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// Detector parameters from an optional config file, defaults otherwise.
pub fn load_detector_config(path: Option<&Path>) -> Result<DetectorConfig> {
    match path {
        Some(path) => Ok(Config::from_file(path)?.detectors),
        None => Ok(DetectorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [detectors]
            sag_threshold = 0.85
            rms_window = 64
            expected_frequency = 50.0
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.detectors.sag_threshold, 0.85);
        assert_eq!(config.detectors.rms_window, 64);
        assert_eq!(config.detectors.expected_frequency, 50.0);
        // Unset keys keep defaults
        assert_eq!(config.detectors.saturation_window, 5);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.detectors, DetectorConfig::default());
    }
}
