use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use comtrade_analyzer::{check_conformance, WaveformRecord};

use super::config::load_detector_config;

/// Check the recording metadata for conformance errors
pub fn run(record: PathBuf, freq: Option<f64>, config: Option<&Path>) -> Result<()> {
    let record = WaveformRecord::from_json_file(&record)
        .with_context(|| format!("Failed to load record: {}", record.display()))?;

    // --freq wins over the config file's expected_frequency
    let expected = match freq {
        Some(freq) => freq,
        None => load_detector_config(config)?.expected_frequency,
    };

    info!("Running conformance checks (expected {} Hz)...", expected);
    let report = check_conformance(&record.metadata, expected);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if any check failed
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
