//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::output::OutputFormatter;
use crate::source;
use anyhow::Result;

pub async fn execute(args: &FetchArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let bytes = source::fetch_bundle(&args.source).await?;
    let written = source::write_archive(&args.out, &bytes)?;

    formatter.format_fetch_result(&args.out, written)?;

    Ok(())
}
