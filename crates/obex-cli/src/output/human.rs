//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use obex_core::ExtractionReport;
use obex_core::validate::BundleValidation;
use obex_core::validate::UnitValidation;
use obex_core::validate::ValidationStatus;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_findings(&self, unit: &UnitValidation) {
        for error in &unit.errors {
            if self.use_colors {
                let _ = self.term.write_line(&format!(
                    "{} {}: {error}",
                    style("Error:").red().bold(),
                    unit.unit
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("Error: {}: {error}", unit.unit));
            }
        }
        if self.quiet {
            return;
        }
        for warning in &unit.warnings {
            if self.use_colors {
                let _ = self.term.write_line(&format!(
                    "{} {}: {warning}",
                    style("Warning:").yellow().bold(),
                    unit.unit
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("Warning: {}: {warning}", unit.unit));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        // the ordered path list is the primary result
        for path in &report.paths {
            let _ = self.term.write_line(&path.display().to_string());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_fetch_result(&self, path: &Path, bytes_written: u64) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let message = format!("Wrote {bytes_written} bytes to {}", path.display());
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(&message);
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Archive size: {}",
                Self::format_size(bytes_written)
            ));
        }

        Ok(())
    }

    fn format_validation_report(&self, validation: &BundleValidation) -> Result<()> {
        for unit in &validation.results {
            self.write_findings(unit);
        }

        if self.quiet {
            return Ok(());
        }

        let summary = format!(
            "Bundle validation {}: {} errors, {} warnings ({} files scanned)",
            validation.status(),
            validation.error_count(),
            validation.warning_count(),
            validation.files_scanned
        );
        if self.use_colors {
            let marker = match validation.status() {
                ValidationStatus::Pass => style("✓").green().bold(),
                ValidationStatus::Warning => style("⚠").yellow().bold(),
                ValidationStatus::Fail => style("✗").red().bold(),
            };
            let _ = self.term.write_line(&format!("{marker} {summary}"));
        } else {
            let _ = self.term.write_line(&summary);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(512), "512 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(HumanFormatter::format_size(1024 * 1024), "1.0 MB");
        assert_eq!(HumanFormatter::format_size(1536 * 1024), "1.5 MB");
    }

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(
            HumanFormatter::format_size(3 * 1024 * 1024 * 1024 / 2),
            "1.5 GB"
        );
    }

    #[test]
    fn test_quiet_formatter_suppresses_summaries() {
        let formatter = HumanFormatter::new(false, true);
        let report = ExtractionReport::new();
        formatter.format_extraction_result(&report).unwrap();
        formatter.format_fetch_result(Path::new("x.zip"), 10).unwrap();
    }
}
