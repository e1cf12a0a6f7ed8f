//! Run command implementation: fetch, extract, and validate in one pass.

use crate::cli::RunArgs;
use crate::error::add_bundle_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::source;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use obex_core::ExtractionReport;
use obex_core::NoopProgress;
use obex_core::extract_bundle_with_progress;
use obex_core::validate::validate_bundle_dir;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub async fn execute(args: &RunArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let bytes = source::fetch_bundle(&args.source).await?;

    let report = match &args.save_archive {
        Some(path) => {
            let written = source::write_archive(path, &bytes)?;
            formatter.format_success(&format!(
                "Saved archive to {} ({written} bytes)",
                path.display()
            ));
            extract(path, &args.output_dir)?
        }
        None => {
            // the temp file lives exactly as long as the extraction needs it
            let mut archive = NamedTempFile::new().context("failed to create temp file")?;
            archive
                .write_all(&bytes)
                .context("failed to write archive to temp file")?;
            extract(archive.path(), &args.output_dir)?
        }
    };

    formatter.format_extraction_result(&report)?;

    let validation = validate_bundle_dir(&args.output_dir)?;
    formatter.format_validation_report(&validation)?;

    if !validation.passed() {
        bail!("bundle validation failed");
    }
    if validation.warning_count() > 0 {
        formatter.format_warning(&format!(
            "bundle validated with {} warnings",
            validation.warning_count()
        ));
    }

    Ok(())
}

fn extract(archive: &Path, output_dir: &Path) -> Result<ExtractionReport> {
    if CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_bundle_context(
            extract_bundle_with_progress(archive, output_dir, &mut progress),
            archive,
        )
    } else {
        let mut noop = NoopProgress;
        add_bundle_context(
            extract_bundle_with_progress(archive, output_dir, &mut noop),
            archive,
        )
    }
}
