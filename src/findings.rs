//! # Findings
//!
//! The output entities of the analysis core. Every detector and the
//! conformance checker ultimately produce [`Finding`] values, consumed by the
//! CLI or the grid-search correlator for reporting. Findings are immutable
//! and never persisted.

use serde::Serialize;
use std::fmt;

/// Severity of a conformance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// Direction of an RMS voltage excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcursionKind {
    /// Sustained drop below the threshold fraction of nominal
    Sag,
    /// Sustained rise above the threshold fraction of nominal
    Swell,
}

impl fmt::Display for ExcursionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcursionKind::Sag => write!(f, "sag"),
            ExcursionKind::Swell => write!(f, "swell"),
        }
    }
}

/// First crossing of the windowed-RMS threshold on a voltage channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoltageExcursion {
    pub kind: ExcursionKind,
    pub channel_id: String,
    /// Time of the last sample of the first crossing window, seconds
    pub start_time: f64,
    /// Windowed RMS value at the crossing
    pub extreme_rms: f64,
}

/// First digital trip assertion after a reference fault time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayTrip {
    pub channel_id: String,
    /// Time of the assertion, seconds
    pub trip_time: f64,
    /// Delay from the reference fault start, milliseconds
    pub delay_ms: f64,
}

/// First run of exactly-equal consecutive current samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationEvent {
    pub channel_id: String,
    /// Time of the first sample of the run, seconds
    pub start_time: f64,
}

/// A zero-crossing cycle whose estimated frequency left the tolerance band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyDeviation {
    /// Time of the first crossing of the cycle, seconds
    pub time: f64,
    /// Estimated instantaneous frequency, Hz
    pub estimated_frequency: f64,
}

/// A single analysis finding, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    ConformanceIssue { severity: Severity, message: String },
    VoltageExcursion(VoltageExcursion),
    RelayTrip(RelayTrip),
    SaturationEvent(SaturationEvent),
    FrequencyDeviation(FrequencyDeviation),
    /// Soft error: a requested channel id did not resolve
    ChannelNotFound { channel_id: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::ConformanceIssue { severity, message } => {
                write!(f, "{}: {}", severity, message)
            }
            Finding::VoltageExcursion(e) => write!(
                f,
                "Voltage {} on '{}' at {:.4}s (RMS {:.2})",
                e.kind, e.channel_id, e.start_time, e.extreme_rms
            ),
            Finding::RelayTrip(t) => write!(
                f,
                "Relay trip on '{}' at {:.4}s (Delay: {:.2}ms)",
                t.channel_id, t.trip_time, t.delay_ms
            ),
            Finding::SaturationEvent(s) => write!(
                f,
                "Potential CT saturation on '{}' at {:.4}s",
                s.channel_id, s.start_time
            ),
            Finding::FrequencyDeviation(d) => write!(
                f,
                "Frequency deviation at {:.4}s ({:.3} Hz)",
                d.time, d.estimated_frequency
            ),
            Finding::ChannelNotFound { channel_id } => {
                write!(f, "Channel '{}' not found", channel_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display() {
        let finding = Finding::RelayTrip(RelayTrip {
            channel_id: "TRIP".to_string(),
            trip_time: 0.2501,
            delay_ms: 50.5,
        });
        assert_eq!(
            finding.to_string(),
            "Relay trip on 'TRIP' at 0.2501s (Delay: 50.50ms)"
        );
    }

    #[test]
    fn test_finding_json_tagging() {
        let finding = Finding::ChannelNotFound {
            channel_id: "VX".to_string(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "channel_not_found");
        assert_eq!(json["channel_id"], "VX");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let finding = Finding::ConformanceIssue {
            severity: Severity::Warning,
            message: "Unexpected frequency detected (0 Hz).".to_string(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["severity"], "warning");
    }
}
