//! # Grid-Search Correlator
//!
//! Brute-force composition of the detectors across every distinct analog
//! channel pair `(voltage, current)`. For each pair whose voltage channel
//! shows a sag, the current channel is scanned for CT saturation and every
//! status channel is checked for a relay trip anchored at the sag's start
//! time. O(A²·S) with no pruning; A and S are tens at most for a single
//! recording.

use log::{debug, info};
use serde::Serialize;
use std::fmt;

use crate::detectors::{Analyzer, AnalyzerError};
use crate::findings::{RelayTrip, SaturationEvent, VoltageExcursion};

/// One report block: a sag-producing `(voltage, current)` pair and the
/// findings correlated with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub voltage_channel: String,
    pub current_channel: String,
    pub sag: VoltageExcursion,
    pub saturation: Option<SaturationEvent>,
    pub trips: Vec<RelayTrip>,
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Analysis for V:{}, C:{} ---",
            self.voltage_channel, self.current_channel
        )?;
        writeln!(
            f,
            "  Voltage sag on '{}' at {:.4}s.",
            self.voltage_channel, self.sag.start_time
        )?;
        if let Some(saturation) = &self.saturation {
            writeln!(
                f,
                "  Potential CT saturation on '{}' at {:.4}s.",
                self.current_channel, saturation.start_time
            )?;
        }
        for trip in &self.trips {
            writeln!(
                f,
                "  Relay trip on '{}' at {:.4}s (Delay: {:.2}ms).",
                trip.channel_id, trip.trip_time, trip.delay_ms
            )?;
        }
        Ok(())
    }
}

impl Analyzer<'_> {
    /// Run the detector grid search over all distinct analog channel pairs.
    ///
    /// Emits one [`CorrelationReport`] per pair whose sag detection produced
    /// an event; pairs with the same channel index on both sides are
    /// skipped. Sag, saturation, and trip detection all use the analyzer's
    /// configured defaults.
    pub fn grid_search(
        &self,
        nominal_voltage: f64,
    ) -> Result<Vec<CorrelationReport>, AnalyzerError> {
        let record = self.record();
        let mut reports = Vec::new();

        info!(
            "grid search over {} analog and {} status channels",
            record.analog_ids.len(),
            record.status_ids.len()
        );

        for (vi, voltage_id) in record.analog_ids.iter().enumerate() {
            for (ci, current_id) in record.analog_ids.iter().enumerate() {
                if vi == ci {
                    continue;
                }

                let Some(sag) = self.detect_sag(voltage_id, nominal_voltage)?.into_event()
                else {
                    continue;
                };
                debug!(
                    "pair V:{} C:{}: sag at {:.4}s",
                    voltage_id, current_id, sag.start_time
                );

                let saturation = self.detect_ct_saturation(current_id)?.into_event();

                let mut trips = Vec::new();
                for trip_id in &record.status_ids {
                    if let Some(trip) =
                        self.check_relay_trip(trip_id, sag.start_time)?.into_event()
                    {
                        trips.push(trip);
                    }
                }

                reports.push(CorrelationReport {
                    voltage_channel: voltage_id.clone(),
                    current_channel: current_id.clone(),
                    sag,
                    saturation,
                    trips,
                });
            }
        }

        info!("grid search complete: {} report blocks", reports.len());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordMetadata, WaveformRecord};

    /// One sagging voltage channel, one healthy high-level channel with a
    /// saturation plateau, one asserting trip channel and one quiet one.
    fn fault_record() -> WaveformRecord {
        let n = 400;
        let time: Vec<f64> = (0..n).map(|i| i as f64 * 0.001).collect();

        // Sags from 2 kV to ~141 V at sample 200
        let mut va = vec![2000.0; 200];
        va.extend(vec![100.0 * std::f64::consts::SQRT_2; 200]);

        // Stays far above the sag limit; flat run of 5 at sample 50
        let mut ia: Vec<f64> = (0..n).map(|i| 3000.0 + (i as f64 * 0.9).sin()).collect();
        for sample in ia.iter_mut().skip(50).take(5) {
            *sample = 3500.0;
        }

        // Asserts 30 ms after the sag window closes (sample 249)
        let mut trip = vec![0u8; n];
        for value in trip.iter_mut().skip(280) {
            *value = 1;
        }
        let quiet = vec![0u8; n];

        WaveformRecord {
            metadata: RecordMetadata {
                station_name: "GRID-TEST".to_string(),
                recorder_id: "R".to_string(),
                file_type: "BINARY".to_string(),
                analog_count: 2,
                status_count: 2,
                channels_count: 4,
                frequency: 60.0,
                trigger_time: None,
            },
            time,
            analog: vec![va, ia],
            status: vec![trip, quiet],
            analog_ids: vec!["VA".to_string(), "IA".to_string()],
            status_ids: vec!["TRIP".to_string(), "SPARE".to_string()],
        }
    }

    #[test]
    fn test_single_sag_pair_yields_single_block() {
        let rec = fault_record();
        let analyzer = Analyzer::new(&rec);
        let reports = analyzer.grid_search(230.0).unwrap();

        // Only (VA, IA) sags; (IA, VA) does not because IA never drops
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.voltage_channel, "VA");
        assert_eq!(report.current_channel, "IA");

        // Sag window ends at sample 200 + 50 - 1
        assert_eq!(report.sag.start_time, rec.time[249]);

        // Saturation plateau on IA
        assert_eq!(
            report.saturation.as_ref().unwrap().start_time,
            rec.time[50]
        );

        // Exactly one trip entry, from the asserting channel only
        assert_eq!(report.trips.len(), 1);
        assert_eq!(report.trips[0].channel_id, "TRIP");
        assert_eq!(report.trips[0].trip_time, rec.time[280]);
    }

    #[test]
    fn test_no_sag_means_no_blocks() {
        let mut rec = fault_record();
        // Lift the sagging channel back to a healthy level
        rec.analog[0] = vec![2000.0; 400];
        let analyzer = Analyzer::new(&rec);
        assert!(analyzer.grid_search(230.0).unwrap().is_empty());
    }

    #[test]
    fn test_grid_search_is_idempotent() {
        let rec = fault_record();
        let analyzer = Analyzer::new(&rec);
        assert_eq!(
            analyzer.grid_search(230.0).unwrap(),
            analyzer.grid_search(230.0).unwrap()
        );
    }

    #[test]
    fn test_report_block_formatting() {
        let rec = fault_record();
        let analyzer = Analyzer::new(&rec);
        let reports = analyzer.grid_search(230.0).unwrap();
        let text = reports[0].to_string();
        assert!(text.starts_with("--- Analysis for V:VA, C:IA ---"));
        assert!(text.contains("Voltage sag on 'VA'"));
        assert!(text.contains("Potential CT saturation on 'IA'"));
        assert!(text.contains("Relay trip on 'TRIP'"));
    }
}
