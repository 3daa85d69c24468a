//! # COMTRADE Analyzer CLI
//!
//! Command-line front end for analyzing disturbance recordings: metadata
//! information, conformance checks, targeted fault analysis, and the
//! grid-search correlation over all channel pairs. Recordings are supplied
//! as JSON interchange files produced by an external decoder; the `demo`
//! subcommand writes a synthetic one to experiment with.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a demo recording
//! comtrade-analyzer demo fault.json
//!
//! # Inspect it
//! comtrade-analyzer info fault.json
//!
//! # Conformance checks
//! comtrade-analyzer conformance fault.json --freq 60
//!
//! # Targeted fault analysis
//! comtrade-analyzer faults fault.json --voltage-ch VA --current-ch IA \
//!     --trip-ch TRIP --nominal-v 230
//!
//! # Every channel combination
//! comtrade-analyzer grid-search fault.json --nominal-v 230
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    cli.run()
}
