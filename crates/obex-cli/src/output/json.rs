//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use obex_core::ExtractionReport;
use obex_core::validate::BundleValidation;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            paths: Vec<String>,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            paths: report
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_fetch_result(&self, path: &Path, bytes_written: u64) -> Result<()> {
        #[derive(Serialize)]
        struct FetchOutput {
            output_path: String,
            bytes_written: u64,
        }

        let data = FetchOutput {
            output_path: path.display().to_string(),
            bytes_written,
        };

        let output = JsonOutput::success("fetch", data);
        Self::output(&output)
    }

    fn format_validation_report(&self, validation: &BundleValidation) -> Result<()> {
        #[derive(Serialize)]
        struct UnitOutput {
            unit: String,
            errors: Vec<String>,
            warnings: Vec<String>,
        }

        #[derive(Serialize)]
        struct ValidationOutput {
            result: String,
            files_scanned: usize,
            error_count: usize,
            warning_count: usize,
            units: Vec<UnitOutput>,
        }

        let data = ValidationOutput {
            result: validation.status().to_string(),
            files_scanned: validation.files_scanned,
            error_count: validation.error_count(),
            warning_count: validation.warning_count(),
            units: validation
                .results
                .iter()
                .map(|unit| UnitOutput {
                    unit: unit.unit.clone(),
                    errors: unit.errors.clone(),
                    warnings: unit.warnings.clone(),
                })
                .collect(),
        };

        let output = JsonOutput::success("validate", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            "unknown",
            SuccessData {
                message: message.to_owned(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_owned(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use obex_core::validate::UnitValidation;

    #[test]
    fn test_envelope_shape() {
        let output = JsonOutput::success("extract", 7);
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"operation\":\"extract\""));
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"data\":7"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_error_envelope_shape() {
        let output = JsonOutput::<()>::error("fetch", "boom");
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_validation_units_serialize_in_order() {
        let mut validation = BundleValidation::default();
        let mut first = UnitValidation::new("alpha");
        first.errors.push("broken".to_owned());
        validation.results.push(first);
        validation.results.push(UnitValidation::new("beta"));

        let formatter = JsonFormatter;
        formatter.format_validation_report(&validation).unwrap();
    }
}
