//! # Fault-Signature Detectors
//!
//! The algorithmic core: windowed-RMS excursion detection (sags/swells),
//! relay-trip correlation, CT saturation detection, and zero-crossing
//! frequency estimation. Each detector is a pure function of the immutable
//! [`WaveformRecord`] and its parameters; [`Analyzer`] bundles the record
//! with a [`DetectorConfig`] so callers get the documented defaults without
//! threading every knob through every call.
//!
//! ## Result convention
//!
//! Every detector distinguishes three mutually exclusive outcomes via
//! [`Detection`]: an anomaly was found, nothing was found, or the requested
//! channel does not exist (a soft error, returned as data). Malformed
//! parameters (zero windows, an empty record) are the only hard errors and
//! fail fast as [`AnalyzerError`].

mod frequency;
mod relay;
mod rms;
mod saturation;

pub use frequency::CycleWindowing;

use serde::Deserialize;

use crate::findings::{
    Finding, FrequencyDeviation, RelayTrip, SaturationEvent, VoltageExcursion,
};
use crate::record::WaveformRecord;

/// Hard errors from malformed detector input.
///
/// These are precondition violations, not analysis outcomes; a missing
/// channel is *not* an error (see [`Detection::ChannelNotFound`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    /// A window or threshold parameter is outside its valid range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The record contains no samples
    #[error("Record contains no samples")]
    EmptyRecord,
}

/// Tri-state detector outcome.
///
/// The three states are mutually exclusive and exhaustive: callers must not
/// conflate "nothing detected" with "channel missing".
#[derive(Debug, Clone, PartialEq)]
pub enum Detection<T> {
    /// The anomaly was found
    Event(T),
    /// The scan completed without finding the anomaly
    NoEvent,
    /// The requested channel id did not resolve (soft error)
    ChannelNotFound { channel_id: String },
}

impl<T> Detection<T> {
    /// The event payload, if one was found.
    pub fn event(&self) -> Option<&T> {
        match self {
            Detection::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Consume the detection, yielding the event payload if any.
    pub fn into_event(self) -> Option<T> {
        match self {
            Detection::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Detection::Event(_))
    }

    pub fn is_channel_not_found(&self) -> bool {
        matches!(self, Detection::ChannelNotFound { .. })
    }
}

impl<T: Into<Finding>> Detection<T> {
    /// Render the detection as an optional reportable finding.
    ///
    /// `NoEvent` has no finding; a missing channel becomes the soft
    /// [`Finding::ChannelNotFound`].
    pub fn into_finding(self) -> Option<Finding> {
        match self {
            Detection::Event(e) => Some(e.into()),
            Detection::NoEvent => None,
            Detection::ChannelNotFound { channel_id } => {
                Some(Finding::ChannelNotFound { channel_id })
            }
        }
    }
}

impl From<VoltageExcursion> for Finding {
    fn from(e: VoltageExcursion) -> Self {
        Finding::VoltageExcursion(e)
    }
}

impl From<RelayTrip> for Finding {
    fn from(t: RelayTrip) -> Self {
        Finding::RelayTrip(t)
    }
}

impl From<SaturationEvent> for Finding {
    fn from(s: SaturationEvent) -> Self {
        Finding::SaturationEvent(s)
    }
}

/// Detector parameter defaults, overridable per call.
///
/// One immutable value threaded through every detector invocation; there is
/// no ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Sag threshold as a fraction of nominal voltage
    pub sag_threshold: f64,

    /// Swell threshold as a fraction of nominal voltage
    pub swell_threshold: f64,

    /// Moving-average window for RMS computation, in samples
    pub rms_window: usize,

    /// Run length of identical samples treated as CT saturation
    pub saturation_window: usize,

    /// Frequency deviation tolerance in Hz
    pub frequency_threshold: f64,

    /// Expected nominal line frequency in Hz
    pub expected_frequency: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sag_threshold: 0.9,
            swell_threshold: 1.1,
            rms_window: 50,
            saturation_window: 5,
            frequency_threshold: 1.0,
            expected_frequency: 60.0,
        }
    }
}

/// Analysis session over one immutable recording.
///
/// Borrows the record for its lifetime; all methods are pure and repeatable.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    record: &'a WaveformRecord,
    config: DetectorConfig,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer with default detector parameters.
    pub fn new(record: &'a WaveformRecord) -> Self {
        Self::with_config(record, DetectorConfig::default())
    }

    /// Create an analyzer with explicit detector parameters.
    pub fn with_config(record: &'a WaveformRecord, config: DetectorConfig) -> Self {
        Self { record, config }
    }

    pub fn record(&self) -> &'a WaveformRecord {
        self.record
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect the first voltage sag on a channel using configured defaults.
    pub fn detect_sag(
        &self,
        channel_id: &str,
        nominal_voltage: f64,
    ) -> Result<Detection<VoltageExcursion>, AnalyzerError> {
        self.detect_sag_with(
            channel_id,
            nominal_voltage,
            self.config.sag_threshold,
            self.config.rms_window,
        )
    }

    /// Detect the first voltage sag with explicit threshold and window.
    pub fn detect_sag_with(
        &self,
        channel_id: &str,
        nominal_voltage: f64,
        threshold: f64,
        window: usize,
    ) -> Result<Detection<VoltageExcursion>, AnalyzerError> {
        rms::detect_excursion(
            self.record,
            channel_id,
            crate::findings::ExcursionKind::Sag,
            nominal_voltage,
            threshold,
            window,
        )
    }

    /// Detect the first voltage swell on a channel using configured defaults.
    pub fn detect_swell(
        &self,
        channel_id: &str,
        nominal_voltage: f64,
    ) -> Result<Detection<VoltageExcursion>, AnalyzerError> {
        self.detect_swell_with(
            channel_id,
            nominal_voltage,
            self.config.swell_threshold,
            self.config.rms_window,
        )
    }

    /// Detect the first voltage swell with explicit threshold and window.
    pub fn detect_swell_with(
        &self,
        channel_id: &str,
        nominal_voltage: f64,
        threshold: f64,
        window: usize,
    ) -> Result<Detection<VoltageExcursion>, AnalyzerError> {
        rms::detect_excursion(
            self.record,
            channel_id,
            crate::findings::ExcursionKind::Swell,
            nominal_voltage,
            threshold,
            window,
        )
    }

    /// Find the first trip assertion strictly after `fault_start_time`.
    pub fn check_relay_trip(
        &self,
        channel_id: &str,
        fault_start_time: f64,
    ) -> Result<Detection<RelayTrip>, AnalyzerError> {
        relay::check_relay_trip(self.record, channel_id, fault_start_time)
    }

    /// Detect CT saturation using the configured run length.
    pub fn detect_ct_saturation(
        &self,
        channel_id: &str,
    ) -> Result<Detection<SaturationEvent>, AnalyzerError> {
        self.detect_ct_saturation_with(channel_id, self.config.saturation_window)
    }

    /// Detect CT saturation with an explicit run length.
    pub fn detect_ct_saturation_with(
        &self,
        channel_id: &str,
        window: usize,
    ) -> Result<Detection<SaturationEvent>, AnalyzerError> {
        saturation::detect_saturation(self.record, channel_id, window)
    }

    /// Scan for frequency deviations using configured tolerance and the
    /// default overlapping cycle windowing.
    pub fn analyze_frequency(
        &self,
        channel_id: &str,
        nominal_freq: f64,
    ) -> Result<Detection<Vec<FrequencyDeviation>>, AnalyzerError> {
        self.analyze_frequency_with(
            channel_id,
            nominal_freq,
            self.config.frequency_threshold,
            CycleWindowing::Overlapping,
        )
    }

    /// Scan for frequency deviations with explicit tolerance and windowing.
    pub fn analyze_frequency_with(
        &self,
        channel_id: &str,
        nominal_freq: f64,
        threshold: f64,
        windowing: CycleWindowing,
    ) -> Result<Detection<Vec<FrequencyDeviation>>, AnalyzerError> {
        frequency::analyze_frequency(self.record, channel_id, nominal_freq, threshold, windowing)
    }
}

pub(crate) fn ensure_samples(record: &WaveformRecord) -> Result<(), AnalyzerError> {
    if record.samples() == 0 {
        Err(AnalyzerError::EmptyRecord)
    } else {
        Ok(())
    }
}

pub(crate) fn ensure_window(name: &'static str, window: usize) -> Result<(), AnalyzerError> {
    if window == 0 {
        Err(AnalyzerError::InvalidParameter {
            name,
            reason: "window must be at least 1 sample".to_string(),
        })
    } else {
        Ok(())
    }
}
