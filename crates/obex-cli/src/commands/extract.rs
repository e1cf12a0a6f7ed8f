//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_bundle_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use obex_core::NoopProgress;
use obex_core::extract_bundle_with_progress;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    // Use a progress bar when attached to a TTY
    let report = if CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_bundle_context(
            extract_bundle_with_progress(&args.archive, &args.output_dir, &mut progress),
            &args.archive,
        )?
    } else {
        let mut noop = NoopProgress;
        add_bundle_context(
            extract_bundle_with_progress(&args.archive, &args.output_dir, &mut noop),
            &args.archive,
        )?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}
