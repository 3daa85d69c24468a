use anyhow::{Context, Result};
use std::path::PathBuf;

use comtrade_analyzer::WaveformRecord;

/// Display information about a recording, including channel ids
pub fn run(record: PathBuf) -> Result<()> {
    let record = WaveformRecord::from_json_file(&record)
        .with_context(|| format!("Failed to load record: {}", record.display()))?;
    let meta = &record.metadata;

    println!("COMTRADE Recording Information");
    println!("==============================");
    println!("  Station: {}", meta.station_name);
    println!("  Recorder ID: {}", meta.recorder_id);
    match &meta.trigger_time {
        Some(t) => println!("  Trigger Time: {}", t),
        None => println!("  Trigger Time: (not recorded)"),
    }
    println!("  File Type: {}", meta.file_type);
    println!("  Frequency: {} Hz", meta.frequency);
    println!("  Samples: {}", record.samples());

    println!("\nAnalog Channels:");
    for (i, channel_id) in record.analog_ids.iter().enumerate() {
        println!("  {}: {}", i + 1, channel_id);
    }

    println!("\nDigital Channels:");
    for (i, channel_id) in record.status_ids.iter().enumerate() {
        println!("  {}: {}", i + 1, channel_id);
    }

    Ok(())
}
