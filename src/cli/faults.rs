use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use comtrade_analyzer::{Analyzer, Detection, Finding, WaveformRecord};

use super::config::load_detector_config;

/// Analyze fault patterns on explicitly named channels.
///
/// The classic workflow: sag detection on the voltage channel, a relay-trip
/// check anchored at the sag start, and CT saturation detection on the
/// current channel.
pub fn run(
    record: PathBuf,
    voltage_ch: &str,
    current_ch: &str,
    trip_ch: &str,
    nominal_v: f64,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let record = WaveformRecord::from_json_file(&record)
        .with_context(|| format!("Failed to load record: {}", record.display()))?;
    let config = load_detector_config(config)?;
    let analyzer = Analyzer::with_config(&record, config);

    info!("Running fault analysis...");
    let mut findings: Vec<Finding> = Vec::new();

    let sag = analyzer.detect_sag(voltage_ch, nominal_v)?;
    let trip = match &sag {
        Detection::Event(sag) => {
            if !json {
                println!(
                    "Voltage sag detected on '{}' at {:.4}s.",
                    sag.channel_id, sag.start_time
                );
            }
            Some(analyzer.check_relay_trip(trip_ch, sag.start_time)?)
        }
        Detection::NoEvent => {
            if !json {
                println!("No voltage sags detected.");
            }
            None
        }
        Detection::ChannelNotFound { channel_id } => {
            if !json {
                println!(
                    "Error detecting voltage sags: Voltage channel '{}' not found.",
                    channel_id
                );
            }
            None
        }
    };
    findings.extend(sag.into_finding());

    if let Some(trip) = trip {
        if !json {
            match &trip {
                Detection::Event(trip) => println!(
                    "Relay trip detected at {:.4}s (Delay: {:.2}ms).",
                    trip.trip_time, trip.delay_ms
                ),
                Detection::NoEvent => {
                    println!("Relay operation check: No trip signal detected after the fault.")
                }
                Detection::ChannelNotFound { channel_id } => println!(
                    "Relay operation check: Trip channel '{}' not found.",
                    channel_id
                ),
            }
        }
        findings.extend(trip.into_finding());
    }

    let saturation = analyzer.detect_ct_saturation(current_ch)?;
    if !json {
        match &saturation {
            Detection::Event(event) => println!(
                "Potential CT saturation detected on '{}' at {:.4}s.",
                event.channel_id, event.start_time
            ),
            Detection::NoEvent => println!("No CT saturation detected."),
            Detection::ChannelNotFound { channel_id } => println!(
                "CT saturation check: Current channel '{}' not found.",
                channel_id
            ),
        }
    }
    findings.extend(saturation.into_finding());

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    }

    Ok(())
}
