use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use comtrade_analyzer::synthetic::demo_record;

/// Write the synthetic demo fault recording as a record JSON file
pub fn run(output: PathBuf) -> Result<()> {
    info!("Generating synthetic fault recording...");
    let record = demo_record();

    record
        .to_json_file(&output)
        .with_context(|| format!("Failed to write record: {}", output.display()))?;

    info!("Demo recording written");
    println!("Wrote {} samples to {}", record.samples(), output.display());
    println!(
        "Channels: {} analog ({}), {} status ({})",
        record.analog_ids.len(),
        record.analog_ids.join(", "),
        record.status_ids.len(),
        record.status_ids.join(", ")
    );

    Ok(())
}
