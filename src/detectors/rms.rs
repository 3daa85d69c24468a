//! Windowed-RMS excursion detection, shared by sag and swell.
//!
//! A causal moving average over squared samples yields `N - window + 1` RMS
//! values; window index `k` covers samples `k..k + window` and is stamped
//! with the time of its last sample. Only the first strict threshold
//! crossing is reported.

use log::debug;

use super::{ensure_samples, ensure_window, AnalyzerError, Detection};
use crate::findings::{ExcursionKind, VoltageExcursion};
use crate::record::{ChannelKind, WaveformRecord};

pub(super) fn detect_excursion(
    record: &WaveformRecord,
    channel_id: &str,
    kind: ExcursionKind,
    nominal_voltage: f64,
    threshold: f64,
    window: usize,
) -> Result<Detection<VoltageExcursion>, AnalyzerError> {
    ensure_window("rms_window", window)?;
    ensure_samples(record)?;

    let Some(index) = record.find_channel(channel_id, ChannelKind::Analog) else {
        return Ok(Detection::ChannelNotFound {
            channel_id: channel_id.to_string(),
        });
    };

    let data = &record.analog[index];
    let n = data.len();
    if window > n {
        // The moving average is empty; nothing to scan.
        debug!(
            "rms window {} exceeds {} samples on '{}', skipping",
            window, n, channel_id
        );
        return Ok(Detection::NoEvent);
    }

    let limit = nominal_voltage * threshold;
    let inv = 1.0 / window as f64;

    let mut sum: f64 = data[..window].iter().map(|v| v * v).sum();
    for k in 0..=(n - window) {
        let rms = (sum * inv).sqrt();
        let crossed = match kind {
            ExcursionKind::Sag => rms < limit,
            ExcursionKind::Swell => rms > limit,
        };
        if crossed {
            let end = k + window - 1;
            debug!(
                "{} on '{}': window {} (sample {}), rms {:.3} vs limit {:.3}",
                kind, channel_id, k, end, rms, limit
            );
            return Ok(Detection::Event(VoltageExcursion {
                kind,
                channel_id: channel_id.to_string(),
                start_time: record.time[end],
                extreme_rms: rms,
            }));
        }
        if k + window < n {
            sum += data[k + window] * data[k + window] - data[k] * data[k];
        }
    }

    Ok(Detection::NoEvent)
}
