use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use comtrade_analyzer::{Analyzer, Detection, Finding, WaveformRecord};

use super::config::load_detector_config;

/// Scan a voltage channel for zero-crossing frequency deviations
pub fn run(
    record: PathBuf,
    voltage_ch: &str,
    nominal_freq: f64,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let record = WaveformRecord::from_json_file(&record)
        .with_context(|| format!("Failed to load record: {}", record.display()))?;
    let config = load_detector_config(config)?;
    let analyzer = Analyzer::with_config(&record, config);

    info!(
        "Analyzing frequency deviation on '{}' against {} Hz...",
        voltage_ch, nominal_freq
    );

    let findings: Vec<Finding> = match analyzer.analyze_frequency(voltage_ch, nominal_freq)? {
        Detection::Event(deviations) => {
            if !json {
                for d in &deviations {
                    println!(
                        "Frequency deviation at {:.4}s: {:.3} Hz",
                        d.time, d.estimated_frequency
                    );
                }
            }
            deviations.into_iter().map(Finding::FrequencyDeviation).collect()
        }
        Detection::NoEvent => {
            if !json {
                println!("No frequency deviations detected.");
            }
            Vec::new()
        }
        Detection::ChannelNotFound { channel_id } => {
            if !json {
                println!("Voltage channel '{}' not found.", channel_id);
            }
            vec![Finding::ChannelNotFound { channel_id }]
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    }

    Ok(())
}
