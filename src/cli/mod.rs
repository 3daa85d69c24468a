use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod conformance;
mod demo;
mod faults;
mod frequency;
mod grid;
mod info;

/// COMTRADE Analyzer - disturbance recording conformance and fault analysis
#[derive(Parser)]
#[command(name = "comtrade-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about the recording, including channel ids
    Info {
        /// Path to the record JSON file
        #[arg(value_name = "RECORD")]
        record: PathBuf,
    },

    /// Check the recording metadata for conformance errors
    Conformance {
        /// Path to the record JSON file
        #[arg(value_name = "RECORD")]
        record: PathBuf,

        /// Expected line frequency in Hz (default 60, or the config file's
        /// expected_frequency)
        #[arg(long)]
        freq: Option<f64>,

        /// Detector parameter TOML file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Analyze electrical fault patterns on named channels
    Faults {
        /// Path to the record JSON file
        #[arg(value_name = "RECORD")]
        record: PathBuf,

        /// Id of the voltage channel to analyze
        #[arg(long)]
        voltage_ch: String,

        /// Id of the current channel for saturation detection
        #[arg(long)]
        current_ch: String,

        /// Id of the digital trip channel
        #[arg(long)]
        trip_ch: String,

        /// Nominal voltage
        #[arg(long)]
        nominal_v: f64,

        /// Detector parameter TOML file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Emit findings as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Scan a voltage channel for frequency deviations
    Frequency {
        /// Path to the record JSON file
        #[arg(value_name = "RECORD")]
        record: PathBuf,

        /// Id of the voltage channel to analyze
        #[arg(long)]
        voltage_ch: String,

        /// Nominal system frequency in Hz
        #[arg(long, default_value_t = 60.0)]
        nominal_freq: f64,

        /// Detector parameter TOML file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Emit findings as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run fault analysis on all channel combinations
    GridSearch {
        /// Path to the record JSON file
        #[arg(value_name = "RECORD")]
        record: PathBuf,

        /// Nominal voltage
        #[arg(long)]
        nominal_v: f64,

        /// Detector parameter TOML file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Emit report blocks as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the synthetic demo fault recording as a record JSON file
    Demo {
        /// Output record JSON path
        #[arg(value_name = "OUTPUT", default_value = "demo_fault_record.json")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Info { record } => info::run(record),
            Commands::Conformance { record, freq, config } => {
                conformance::run(record, freq, config.as_deref())
            }
            Commands::Faults {
                record,
                voltage_ch,
                current_ch,
                trip_ch,
                nominal_v,
                config,
                json,
            } => faults::run(
                record,
                &voltage_ch,
                &current_ch,
                &trip_ch,
                nominal_v,
                config.as_deref(),
                json,
            ),
            Commands::Frequency {
                record,
                voltage_ch,
                nominal_freq,
                config,
                json,
            } => frequency::run(record, &voltage_ch, nominal_freq, config.as_deref(), json),
            Commands::GridSearch {
                record,
                nominal_v,
                config,
                json,
            } => grid::run(record, nominal_v, config.as_deref(), json),
            Commands::Demo { output } => demo::run(output),
        }
    }
}
