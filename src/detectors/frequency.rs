//! Zero-crossing frequency estimation.
//!
//! Sign changes between consecutive samples mark zero crossings; two
//! consecutive crossing pairs span one full cycle, so the instantaneous
//! frequency over crossings `(c[i], c[i+2])` is `1 / (t[c[i+2]] - t[c[i]])`.
//! The historical scan advances one crossing per step, so adjacent cycles
//! share a crossing and deviations can be reported more densely than once
//! per true cycle. That overlap is load-bearing for downstream report
//! comparisons; [`CycleWindowing::Distinct`] is the opt-in non-overlapping
//! variant.

use log::debug;

use super::{ensure_samples, AnalyzerError, Detection};
use crate::findings::FrequencyDeviation;
use crate::record::{ChannelKind, WaveformRecord};

/// How the crossing sequence is stepped when forming cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleWindowing {
    /// Stride 1: adjacent cycles share a crossing (historical behavior)
    #[default]
    Overlapping,
    /// Stride 2: each crossing belongs to at most one cycle
    Distinct,
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

pub(super) fn analyze_frequency(
    record: &WaveformRecord,
    channel_id: &str,
    nominal_freq: f64,
    threshold: f64,
    windowing: CycleWindowing,
) -> Result<Detection<Vec<FrequencyDeviation>>, AnalyzerError> {
    if !(threshold > 0.0) {
        return Err(AnalyzerError::InvalidParameter {
            name: "frequency_threshold",
            reason: format!("tolerance must be positive, got {}", threshold),
        });
    }
    ensure_samples(record)?;

    let Some(index) = record.find_channel(channel_id, ChannelKind::Analog) else {
        return Ok(Detection::ChannelNotFound {
            channel_id: channel_id.to_string(),
        });
    };

    let data = &record.analog[index];
    let crossings: Vec<usize> = (0..data.len().saturating_sub(1))
        .filter(|&i| sign(data[i + 1]) != sign(data[i]))
        .collect();
    debug!("{} zero crossings on '{}'", crossings.len(), channel_id);

    let step = match windowing {
        CycleWindowing::Overlapping => 1,
        CycleWindowing::Distinct => 2,
    };

    let mut deviations = Vec::new();
    let mut i = 0;
    while i + 2 < crossings.len() {
        let time_diff = record.time[crossings[i + 2]] - record.time[crossings[i]];
        if time_diff > 0.0 {
            let frequency = 1.0 / time_diff;
            if (frequency - nominal_freq).abs() > threshold {
                deviations.push(FrequencyDeviation {
                    time: record.time[crossings[i]],
                    estimated_frequency: frequency,
                });
            }
        }
        i += step;
    }

    if deviations.is_empty() {
        Ok(Detection::NoEvent)
    } else {
        Ok(Detection::Event(deviations))
    }
}
