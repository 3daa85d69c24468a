//! Relay-trip correlation: first digital assertion strictly after a
//! reference fault start time, with the delay reported in milliseconds.

use log::debug;

use super::{ensure_samples, AnalyzerError, Detection};
use crate::findings::RelayTrip;
use crate::record::{ChannelKind, WaveformRecord};

pub(super) fn check_relay_trip(
    record: &WaveformRecord,
    channel_id: &str,
    fault_start_time: f64,
) -> Result<Detection<RelayTrip>, AnalyzerError> {
    ensure_samples(record)?;

    let Some(index) = record.find_channel(channel_id, ChannelKind::Status) else {
        return Ok(Detection::ChannelNotFound {
            channel_id: channel_id.to_string(),
        });
    };

    let data = &record.status[index];
    let hit = data
        .iter()
        .zip(record.time.iter())
        .find(|(&value, &t)| value == 1 && t > fault_start_time);

    match hit {
        Some((_, &trip_time)) => {
            let delay_ms = (trip_time - fault_start_time) * 1000.0;
            debug!(
                "trip on '{}' at {:.6}s, {:.3} ms after fault start",
                channel_id, trip_time, delay_ms
            );
            Ok(Detection::Event(RelayTrip {
                channel_id: channel_id.to_string(),
                trip_time,
                delay_ms,
            }))
        }
        None => Ok(Detection::NoEvent),
    }
}
