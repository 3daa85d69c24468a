//! Synthetic fault recording for demos, tests, and benches.
//!
//! Generates a 0.5 s, 6 kHz record of a staged phase-A fault: the faulted
//! voltage channel sags to 60 % amplitude between 0.2 s and 0.35 s, the
//! current channel clips at the CT limit over the same interval, and the
//! trip channel asserts 60 ms after fault inception. Stands in for the
//! external COMTRADE decoder, which is out of scope.

use chrono::{TimeZone, Utc};

use crate::record::{RecordMetadata, WaveformRecord};

/// Sampling rate of the generated record, Hz.
pub const DEMO_SAMPLE_RATE: f64 = 6000.0;

/// Recording length, seconds.
pub const DEMO_DURATION: f64 = 0.5;

/// Fault inception and clearing times, seconds.
pub const DEMO_FAULT_START: f64 = 0.2;
pub const DEMO_FAULT_END: f64 = 0.35;

const LINE_FREQ: f64 = 60.0;
const NOMINAL_VOLTAGE: f64 = 230.0;
const NOMINAL_CURRENT: f64 = 500.0;
const CT_CLIP_LEVEL: f64 = 600.0;
const TRIP_DELAY: f64 = 0.06;

/// Build the demo fault recording.
pub fn demo_record() -> WaveformRecord {
    let n = (DEMO_SAMPLE_RATE * DEMO_DURATION) as usize;
    let time: Vec<f64> = (0..n).map(|i| i as f64 / DEMO_SAMPLE_RATE).collect();

    let in_fault = |t: f64| t >= DEMO_FAULT_START && t < DEMO_FAULT_END;
    let omega = 2.0 * std::f64::consts::PI * LINE_FREQ;

    // Faulted phase: amplitude drops to 60 % during the fault window
    let va: Vec<f64> = time
        .iter()
        .map(|&t| {
            let scale = if in_fault(t) { 0.6 } else { 1.0 };
            scale * NOMINAL_VOLTAGE * std::f64::consts::SQRT_2 * (omega * t).sin()
        })
        .collect();

    // Healthy phase
    let vb: Vec<f64> = time
        .iter()
        .map(|&t| NOMINAL_VOLTAGE * std::f64::consts::SQRT_2 * (omega * t).sin())
        .collect();

    // Fault current, clipped at the CT limit once the fault is in
    let ia: Vec<f64> = time
        .iter()
        .map(|&t| {
            let raw = NOMINAL_CURRENT * std::f64::consts::SQRT_2 * (omega * t).sin();
            if in_fault(t) {
                raw.clamp(-CT_CLIP_LEVEL, CT_CLIP_LEVEL)
            } else {
                raw
            }
        })
        .collect();

    let trip: Vec<u8> = time
        .iter()
        .map(|&t| u8::from(t >= DEMO_FAULT_START + TRIP_DELAY))
        .collect();
    let spare = vec![0u8; n];

    WaveformRecord {
        metadata: RecordMetadata {
            station_name: "DEMO-SUBSTATION".to_string(),
            recorder_id: "DFR-01".to_string(),
            file_type: "BINARY".to_string(),
            analog_count: 3,
            status_count: 2,
            channels_count: 5,
            frequency: LINE_FREQ,
            trigger_time: Utc.with_ymd_and_hms(2024, 5, 17, 10, 32, 15).single(),
        },
        time,
        analog: vec![va, vb, ia],
        status: vec![trip, spare],
        analog_ids: vec!["VA".to_string(), "VB".to_string(), "IA".to_string()],
        status_ids: vec!["TRIP".to_string(), "SPARE".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::Analyzer;

    #[test]
    fn test_demo_record_shape() {
        let record = demo_record();
        assert_eq!(record.samples(), 3000);
        assert_eq!(record.analog.len(), record.analog_ids.len());
        assert_eq!(record.status.len(), record.status_ids.len());
        for series in &record.analog {
            assert_eq!(series.len(), record.samples());
        }
        for series in &record.status {
            assert_eq!(series.len(), record.samples());
            assert!(series.iter().all(|&v| v <= 1));
        }
    }

    #[test]
    fn test_demo_metadata_is_conformant() {
        let record = demo_record();
        let report = crate::conformance::check_conformance(&record.metadata, 60.0);
        assert!(!report.has_failures());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_demo_fault_signature() {
        let record = demo_record();
        let analyzer = Analyzer::new(&record);

        let sag = analyzer.detect_sag("VA", NOMINAL_VOLTAGE).unwrap();
        let sag = sag.event().expect("VA sags");
        assert!(sag.start_time >= DEMO_FAULT_START);
        assert!(sag.start_time < DEMO_FAULT_END);

        assert!(!analyzer
            .detect_sag("VB", NOMINAL_VOLTAGE)
            .unwrap()
            .is_event());

        let saturation = analyzer.detect_ct_saturation("IA").unwrap();
        assert!(saturation.event().unwrap().start_time >= DEMO_FAULT_START);

        let trip = analyzer.check_relay_trip("TRIP", sag.start_time).unwrap();
        let trip = trip.event().expect("TRIP asserts after the sag");
        assert!(trip.delay_ms > 0.0);
    }
}
