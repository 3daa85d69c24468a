//! # Conformance Checker
//!
//! Metadata consistency validation for a recording. Three independent checks
//! run against the configuration metadata:
//!
//! 1. **Channel counts**: declared total must equal analog + status
//! 2. **File type**: declared tag must be one of ASCII, BINARY, BINARY32, FLOAT32
//! 3. **Line frequency**: declared frequency must be non-zero and within
//!    1 Hz of the expected line frequency
//!
//! No check short-circuits another and all may fire on the same record.
//! Violations are reported, never rejected: a non-conformant record is still
//! analyzable by the detectors.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::findings::{Finding, Severity};
use crate::record::{FileType, RecordMetadata};

/// Result status of a single conformance check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with a warning
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// Individual conformance check result.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceCheck {
    /// Name of the check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ConformanceCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Complete conformance report for a recording's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceReport {
    /// List of individual check results
    pub checks: Vec<ConformanceCheck>,
    /// Station name of the checked record
    pub station: String,
}

/// Run all conformance checks against recording metadata.
///
/// `expected_freq` is the line frequency the recorder should declare,
/// typically 50.0 or 60.0 Hz.
pub fn check_conformance(metadata: &RecordMetadata, expected_freq: f64) -> ConformanceReport {
    let mut report = ConformanceReport {
        checks: Vec::new(),
        station: metadata.station_name.clone(),
    };

    let computed = metadata.analog_count + metadata.status_count;
    if metadata.channels_count != computed {
        report.checks.push(ConformanceCheck::failed(
            "Channel counts",
            format!(
                "Mismatched channel counts. Total declared: {}, sum of analog and status: {}",
                metadata.channels_count, computed
            ),
        ));
    } else {
        report.checks.push(ConformanceCheck::ok("Channel counts"));
    }

    match metadata.file_type.parse::<FileType>() {
        Ok(_) => report.checks.push(ConformanceCheck::ok("File type")),
        Err(_) => report.checks.push(ConformanceCheck::failed(
            "File type",
            format!(
                "Invalid file type '{}'. Valid types are: ASCII, BINARY, BINARY32, FLOAT32",
                metadata.file_type
            ),
        )),
    }

    if metadata.frequency == 0.0 || (metadata.frequency - expected_freq).abs() > 1.0 {
        report.checks.push(ConformanceCheck::warning(
            "Line frequency",
            format!("Unexpected frequency detected ({} Hz).", metadata.frequency),
        ));
    } else {
        report.checks.push(ConformanceCheck::ok("Line frequency"));
    }

    report
}

impl ConformanceReport {
    /// Check if any conformance checks failed.
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any conformance checks produced warnings.
    pub fn has_warnings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Count the number of successful checks.
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// The non-Ok checks as reportable findings.
    pub fn findings(&self) -> Vec<Finding> {
        self.checks
            .iter()
            .filter_map(|c| match &c.status {
                CheckStatus::Ok => None,
                CheckStatus::Warning(msg) => Some(Finding::ConformanceIssue {
                    severity: Severity::Warning,
                    message: msg.clone(),
                }),
                CheckStatus::Failed(msg) => Some(Finding::ConformanceIssue {
                    severity: Severity::Error,
                    message: msg.clone(),
                }),
            })
            .collect()
    }

    /// Format the report with colors (requires console feature).
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Conformance Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("==================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Station").bold(), self.station));

            for check in &self.checks {
                match &check.status {
                    CheckStatus::Ok => {
                        output.push_str(&format!("[{}] {}\n", style("✓").green(), check.name));
                    }
                    CheckStatus::Warning(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            style("⚠").yellow(),
                            check.name,
                            style("WARNING").yellow().bold(),
                            msg
                        ));
                    }
                    CheckStatus::Failed(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            style("✗").red(),
                            check.name,
                            style("FAILED").red().bold(),
                            msg
                        ));
                    }
                }
            }

            output.push('\n');
            if self.has_failures() {
                output.push_str(&format!("{}\n", style("Conformance FAILED").red().bold()));
            } else if self.has_warnings() {
                output.push_str(&format!(
                    "{}\n",
                    style("Conformance PASSED with warnings").yellow().bold()
                ));
            } else {
                output.push_str(&format!("{}\n", style("Conformance PASSED").green().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conformance Report")?;
        writeln!(f, "==================")?;
        writeln!(f, "Station: {}", self.station)?;
        writeln!(f)?;

        for check in &self.checks {
            match &check.status {
                CheckStatus::Ok => writeln!(f, "[✓] {}", check.name)?,
                CheckStatus::Warning(msg) => {
                    writeln!(f, "[⚠] {} - WARNING: {}", check.name, msg)?
                }
                CheckStatus::Failed(msg) => writeln!(f, "[✗] {} - FAILED: {}", check.name, msg)?,
            }
        }

        writeln!(f)?;
        if self.has_failures() {
            writeln!(f, "Conformance FAILED")?;
        } else if self.has_warnings() {
            writeln!(f, "Conformance PASSED with warnings")?;
        } else {
            writeln!(f, "Conformance PASSED")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> RecordMetadata {
        RecordMetadata {
            station_name: "SMARTSTATION".to_string(),
            recorder_id: "REC-1".to_string(),
            file_type: "BINARY".to_string(),
            analog_count: 4,
            status_count: 2,
            channels_count: 6,
            frequency: 60.0,
            trigger_time: None,
        }
    }

    #[test]
    fn test_well_formed_metadata_passes() {
        let report = check_conformance(&metadata(), 60.0);
        assert!(!report.has_failures());
        assert!(!report.has_warnings());
        assert_eq!(report.success_count(), 3);
        assert!(report.findings().is_empty());
    }

    #[test]
    fn test_count_mismatch_is_single_error_with_both_operands() {
        for broken in [
            RecordMetadata { channels_count: 7, ..metadata() },
            RecordMetadata { analog_count: 5, ..metadata() },
            RecordMetadata { status_count: 1, ..metadata() },
        ] {
            let report = check_conformance(&broken, 60.0);
            let computed = broken.analog_count + broken.status_count;
            let errors: Vec<_> = report
                .findings()
                .into_iter()
                .filter(|f| {
                    matches!(f, Finding::ConformanceIssue { severity: Severity::Error, .. })
                })
                .collect();
            assert_eq!(errors.len(), 1);
            let Finding::ConformanceIssue { message, .. } = &errors[0] else {
                unreachable!()
            };
            assert!(message.contains(&broken.channels_count.to_string()));
            assert!(message.contains(&computed.to_string()));
        }
    }

    #[test]
    fn test_file_type_accepts_all_casings() {
        for tag in ["ascii", "Binary", "BINARY32", "fLoAt32"] {
            let m = RecordMetadata { file_type: tag.to_string(), ..metadata() };
            assert!(!check_conformance(&m, 60.0).has_failures(), "tag {tag}");
        }
    }

    #[test]
    fn test_invalid_file_type_names_offender() {
        let m = RecordMetadata { file_type: "PCAP".to_string(), ..metadata() };
        let report = check_conformance(&m, 60.0);
        assert!(report.has_failures());
        let findings = report.findings();
        assert_eq!(findings.len(), 1);
        let Finding::ConformanceIssue { message, .. } = &findings[0] else {
            unreachable!()
        };
        assert!(message.contains("'PCAP'"));
    }

    #[test]
    fn test_frequency_warnings() {
        let zero = RecordMetadata { frequency: 0.0, ..metadata() };
        assert_eq!(check_conformance(&zero, 60.0).findings().len(), 1);

        let exact = RecordMetadata { frequency: 60.0, ..metadata() };
        assert!(check_conformance(&exact, 60.0).findings().is_empty());

        // Delta 1.5 > 1.0 Hz tolerance
        let off = RecordMetadata { frequency: 58.5, ..metadata() };
        let findings = check_conformance(&off, 60.0).findings();
        assert_eq!(findings.len(), 1);
        assert!(matches!(
            findings[0],
            Finding::ConformanceIssue { severity: Severity::Warning, .. }
        ));

        // 50 Hz systems pass when the caller says so
        let fifty = RecordMetadata { frequency: 50.0, ..metadata() };
        assert!(check_conformance(&fifty, 50.0).findings().is_empty());
    }

    #[test]
    fn test_checks_are_independent() {
        let m = RecordMetadata {
            channels_count: 9,
            file_type: "EBCDIC".to_string(),
            frequency: 0.0,
            ..metadata()
        };
        let report = check_conformance(&m, 60.0);
        assert_eq!(report.findings().len(), 3);
        assert!(report.has_failures());
        assert!(report.has_warnings());
    }
}
