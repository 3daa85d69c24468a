//! CT saturation detection: the first run of exactly-equal consecutive
//! samples on a current channel. A saturated (clipped) CT repeats the clip
//! level literally, so exact comparison is intentional; physically noisy
//! signals will rarely trigger.

use log::debug;

use super::{ensure_samples, ensure_window, AnalyzerError, Detection};
use crate::findings::SaturationEvent;
use crate::record::{ChannelKind, WaveformRecord};

pub(super) fn detect_saturation(
    record: &WaveformRecord,
    channel_id: &str,
    window: usize,
) -> Result<Detection<SaturationEvent>, AnalyzerError> {
    ensure_window("saturation_window", window)?;
    ensure_samples(record)?;

    let Some(index) = record.find_channel(channel_id, ChannelKind::Analog) else {
        return Ok(Detection::ChannelNotFound {
            channel_id: channel_id.to_string(),
        });
    };

    let data = &record.analog[index];
    for i in 0..data.len().saturating_sub(window) {
        if data[i..i + window].iter().all(|&v| v == data[i]) {
            debug!(
                "saturation run of {} samples on '{}' starting at sample {}",
                window, channel_id, i
            );
            return Ok(Detection::Event(SaturationEvent {
                channel_id: channel_id.to_string(),
                start_time: record.time[i],
            }));
        }
    }

    Ok(Detection::NoEvent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::Analyzer;
    use crate::record::RecordMetadata;

    fn record(data: Vec<f64>) -> WaveformRecord {
        let n = data.len();
        WaveformRecord {
            metadata: RecordMetadata {
                station_name: "T".to_string(),
                recorder_id: "R".to_string(),
                file_type: "BINARY".to_string(),
                analog_count: 1,
                status_count: 0,
                channels_count: 1,
                frequency: 60.0,
                trigger_time: None,
            },
            time: (0..n).map(|i| i as f64 * 0.001).collect(),
            analog: vec![data],
            status: vec![],
            analog_ids: vec!["IA".to_string()],
            status_ids: vec![],
        }
    }

    /// Varying everywhere except a 5-sample plateau starting at index 20.
    fn plateau_at_20() -> Vec<f64> {
        let mut data: Vec<f64> = (0..60).map(|i| (i as f64 * 0.7).sin() * 100.0).collect();
        for sample in data.iter_mut().skip(20).take(5) {
            *sample = 42.5;
        }
        data
    }

    #[test]
    fn test_run_detected_at_known_index() {
        let rec = record(plateau_at_20());
        let analyzer = Analyzer::new(&rec);
        let detection = analyzer.detect_ct_saturation("IA").unwrap();
        let event = detection.event().expect("saturation expected");
        assert_eq!(event.start_time, rec.time[20]);
        assert_eq!(event.channel_id, "IA");
    }

    #[test]
    fn test_no_run_means_no_event() {
        let data: Vec<f64> = (0..60).map(|i| (i as f64 * 0.7).sin() * 100.0).collect();
        let rec = record(data);
        let analyzer = Analyzer::new(&rec);
        assert_eq!(
            analyzer.detect_ct_saturation("IA").unwrap(),
            Detection::NoEvent
        );
    }

    #[test]
    fn test_shorter_run_does_not_trigger() {
        let mut data: Vec<f64> = (0..60).map(|i| (i as f64 * 0.7).sin() * 100.0).collect();
        for sample in data.iter_mut().skip(20).take(4) {
            *sample = 42.5;
        }
        let rec = record(data);
        let analyzer = Analyzer::new(&rec);
        assert_eq!(
            analyzer.detect_ct_saturation("IA").unwrap(),
            Detection::NoEvent
        );
    }

    #[test]
    fn test_longer_window_override() {
        let rec = record(plateau_at_20());
        let analyzer = Analyzer::new(&rec);
        // A 6-sample run is not there; the plateau is exactly 5 samples
        assert_eq!(
            analyzer.detect_ct_saturation_with("IA", 6).unwrap(),
            Detection::NoEvent
        );
        let event = analyzer
            .detect_ct_saturation_with("IA", 3)
            .unwrap()
            .into_event()
            .unwrap();
        assert_eq!(event.start_time, rec.time[20]);
    }

    #[test]
    fn test_missing_channel() {
        let rec = record(plateau_at_20());
        let analyzer = Analyzer::new(&rec);
        assert!(analyzer
            .detect_ct_saturation("IB")
            .unwrap()
            .is_channel_not_found());
    }
}
