//! # comtrade-analyzer - Disturbance Recording Analysis
//!
//! `comtrade_analyzer` validates and analyzes digitized power-system
//! disturbance recordings: analog voltage/current waveforms and digital
//! status signals sampled over a common time vector. It is aimed at
//! protection engineers validating recorder output and post-fault reports.
//!
//! ## What it checks
//!
//! - **Conformance**: declared channel counts, data-file type tag, and
//!   nominal line frequency of the recording metadata.
//! - **Voltage sags and swells**: first windowed-RMS threshold crossing.
//! - **Relay trip delay**: first digital assertion after a reference fault
//!   time, delay in milliseconds.
//! - **CT saturation**: first run of exactly-equal consecutive current
//!   samples (a clipped waveform).
//! - **Frequency deviation**: zero-crossing instantaneous frequency
//!   estimates outside a tolerance band.
//! - **Grid-search correlation**: the detectors composed across every
//!   distinct analog channel pair.
//!
//! The crate consumes an already-parsed [`record::WaveformRecord`]; decoding
//! the COMTRADE file formats is the job of an external provider, and records
//! are exchanged as JSON. Nothing here performs I/O during analysis, holds
//! shared mutable state, or spawns threads: detectors are pure functions of
//! the immutable record plus their parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use comtrade_analyzer::detectors::{Analyzer, Detection};
//! use comtrade_analyzer::synthetic::demo_record;
//!
//! let record = demo_record();
//! let analyzer = Analyzer::new(&record);
//!
//! match analyzer.detect_sag("VA", 230.0)? {
//!     Detection::Event(sag) => println!("sag at {:.4}s", sag.start_time),
//!     Detection::NoEvent => println!("no sag"),
//!     Detection::ChannelNotFound { channel_id } => {
//!         println!("no channel '{}'", channel_id)
//!     }
//! }
//! # Ok::<(), comtrade_analyzer::detectors::AnalyzerError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`record`]: the Waveform Record data model and channel locator
//! - [`conformance`]: metadata consistency checks and report formatting
//! - [`detectors`]: the four waveform detectors behind one tri-state result
//! - [`correlate`]: the brute-force grid-search correlator
//! - [`findings`]: the tagged output entities consumed by reporting layers
//! - [`synthetic`]: generated demo recording used by the CLI, tests, and
//!   benches

// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod conformance;
pub mod correlate;
pub mod detectors;
pub mod findings;
pub mod record;
pub mod synthetic;

pub use conformance::{check_conformance, ConformanceReport};
pub use correlate::CorrelationReport;
pub use detectors::{Analyzer, AnalyzerError, CycleWindowing, Detection, DetectorConfig};
pub use findings::{Finding, Severity};
pub use record::{ChannelKind, FileType, RecordMetadata, WaveformRecord};
