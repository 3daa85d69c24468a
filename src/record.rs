//! # Waveform Record
//!
//! Data model for a parsed disturbance recording: metadata, the time vector,
//! analog/status channel arrays, and the channel id lists. The record is
//! produced by an external decoder (COMTRADE parsing is out of scope here) and
//! exchanged as JSON; once constructed it is read-only input shared by every
//! detector.
//!
//! Also home of the channel locator, the case-insensitive id-to-index lookup
//! that all detectors go through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

/// Errors that can occur while loading or saving a record interchange file.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// I/O error reading or writing the record file
    #[error("Failed to read record file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Record JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The four data-file encodings a recording may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Ascii,
    Binary,
    Binary32,
    Float32,
}

/// Raised when a declared file-type tag is not one of the recognized four.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized file type tag '{0}'")]
pub struct UnknownFileType(pub String);

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASCII" => Ok(FileType::Ascii),
            "BINARY" => Ok(FileType::Binary),
            "BINARY32" => Ok(FileType::Binary32),
            "FLOAT32" => Ok(FileType::Float32),
            _ => Err(UnknownFileType(s.to_string())),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FileType::Ascii => "ASCII",
            FileType::Binary => "BINARY",
            FileType::Binary32 => "BINARY32",
            FileType::Float32 => "FLOAT32",
        };
        write!(f, "{}", tag)
    }
}

/// Which channel collection a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Analog,
    Status,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Analog => write!(f, "analog"),
            ChannelKind::Status => write!(f, "status"),
        }
    }
}

/// Recorder metadata from the configuration section of the recording.
///
/// `file_type` is kept as the raw declared tag; conformance checking decides
/// whether it parses as a recognized [`FileType`]. Count mismatches are
/// likewise reported rather than rejected, so the fields are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Substation name
    pub station_name: String,

    /// Recording device identifier
    pub recorder_id: String,

    /// Declared data-file type tag (e.g., "BINARY"), as written
    pub file_type: String,

    /// Declared number of analog channels
    pub analog_count: usize,

    /// Declared number of status (digital) channels
    pub status_count: usize,

    /// Declared total channel count
    pub channels_count: usize,

    /// Nominal line frequency in Hz
    pub frequency: f64,

    /// Fault trigger timestamp, if the recorder provided one
    pub trigger_time: Option<DateTime<Utc>>,
}

/// A fully decoded disturbance recording.
///
/// `time` has N entries; every analog and status series is index-aligned with
/// it. Status samples are 0/1. The record is never mutated by the analysis
/// core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformRecord {
    pub metadata: RecordMetadata,

    /// Sample timestamps in seconds, monotonically non-decreasing
    pub time: Vec<f64>,

    /// Analog sample series, one per analog channel
    pub analog: Vec<Vec<f64>>,

    /// Digital sample series, one per status channel, values in {0, 1}
    pub status: Vec<Vec<u8>>,

    /// Analog channel ids, declaration order
    pub analog_ids: Vec<String>,

    /// Status channel ids, declaration order
    pub status_ids: Vec<String>,
}

impl WaveformRecord {
    /// Number of samples N in the recording.
    pub fn samples(&self) -> usize {
        self.time.len()
    }

    /// Locate a channel by id, case-insensitively.
    ///
    /// Both the query and each candidate are trimmed and lowercased before
    /// comparison. Returns the first match in declaration order; duplicate
    /// normalized ids resolve to the first.
    pub fn find_channel(&self, channel_id: &str, kind: ChannelKind) -> Option<usize> {
        let ids = match kind {
            ChannelKind::Analog => &self.analog_ids,
            ChannelKind::Status => &self.status_ids,
        };
        let query = channel_id.trim().to_lowercase();
        ids.iter()
            .position(|id| id.trim().to_lowercase() == query)
    }

    /// Load a record from a JSON interchange file written by the decoder.
    pub fn from_json_file(path: &Path) -> Result<Self, RecordError> {
        let file = File::open(path)?;
        let record = serde_json::from_reader(BufReader::new(file))?;
        Ok(record)
    }

    /// Write the record as a JSON interchange file.
    pub fn to_json_file(&self, path: &Path) -> Result<(), RecordError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_ids(analog_ids: &[&str], status_ids: &[&str]) -> WaveformRecord {
        WaveformRecord {
            metadata: RecordMetadata {
                station_name: "TEST".to_string(),
                recorder_id: "R1".to_string(),
                file_type: "ASCII".to_string(),
                analog_count: analog_ids.len(),
                status_count: status_ids.len(),
                channels_count: analog_ids.len() + status_ids.len(),
                frequency: 60.0,
                trigger_time: None,
            },
            time: vec![0.0, 0.001],
            analog: analog_ids.iter().map(|_| vec![0.0, 0.0]).collect(),
            status: status_ids.iter().map(|_| vec![0, 0]).collect(),
            analog_ids: analog_ids.iter().map(|s| s.to_string()).collect(),
            status_ids: status_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_find_channel_case_insensitive() {
        let record = record_with_ids(&["VA", "VB", "IA"], &["TRIP"]);
        assert_eq!(record.find_channel("va", ChannelKind::Analog), Some(0));
        assert_eq!(record.find_channel("Ia", ChannelKind::Analog), Some(2));
        assert_eq!(record.find_channel("trip", ChannelKind::Status), Some(0));
    }

    #[test]
    fn test_find_channel_trims_whitespace() {
        let record = record_with_ids(&["  VA ", "VB"], &[]);
        assert_eq!(record.find_channel("va", ChannelKind::Analog), Some(0));
        assert_eq!(record.find_channel(" vb  ", ChannelKind::Analog), Some(1));
    }

    #[test]
    fn test_find_channel_duplicates_resolve_to_first() {
        let record = record_with_ids(&["VA", "va", "VA "], &[]);
        assert_eq!(record.find_channel("VA", ChannelKind::Analog), Some(0));
    }

    #[test]
    fn test_find_channel_missing() {
        let record = record_with_ids(&["VA"], &["TRIP"]);
        assert_eq!(record.find_channel("VC", ChannelKind::Analog), None);
        // Kinds are separate namespaces
        assert_eq!(record.find_channel("VA", ChannelKind::Status), None);
    }

    #[test]
    fn test_file_type_parsing() {
        assert_eq!("ascii".parse::<FileType>().unwrap(), FileType::Ascii);
        assert_eq!("Binary".parse::<FileType>().unwrap(), FileType::Binary);
        assert_eq!("BINARY32".parse::<FileType>().unwrap(), FileType::Binary32);
        assert_eq!(" float32 ".parse::<FileType>().unwrap(), FileType::Float32);
        assert!("PCAP".parse::<FileType>().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let record = record_with_ids(&["VA"], &["TRIP"]);
        let json = serde_json::to_string(&record).unwrap();
        let back: WaveformRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
