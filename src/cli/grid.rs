use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use comtrade_analyzer::{Analyzer, WaveformRecord};

use super::config::load_detector_config;

/// Run fault analysis on all channel combinations
pub fn run(record: PathBuf, nominal_v: f64, config: Option<&Path>, json: bool) -> Result<()> {
    let record = WaveformRecord::from_json_file(&record)
        .with_context(|| format!("Failed to load record: {}", record.display()))?;
    let config = load_detector_config(config)?;
    let analyzer = Analyzer::with_config(&record, config);

    info!("Searching {} analog channel pairs...", {
        let a = record.analog_ids.len();
        a * a.saturating_sub(1)
    });
    if !json {
        println!("Running fault analysis grid search...");
    }

    let reports = analyzer.grid_search(nominal_v)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!();
        print!("{}", report);
    }
    println!("\nGrid search complete.");

    Ok(())
}
