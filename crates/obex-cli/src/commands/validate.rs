//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use obex_core::validate::ValidationStatus;
use obex_core::validate::validate_bundle_dir;

pub fn execute(args: &ValidateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let validation = validate_bundle_dir(&args.bundle_dir)?;

    formatter.format_validation_report(&validation)?;

    match validation.status() {
        ValidationStatus::Pass => Ok(()),
        ValidationStatus::Warning => {
            formatter.format_warning(&format!(
                "bundle validated with {} warnings",
                validation.warning_count()
            ));
            Ok(())
        }
        ValidationStatus::Fail => {
            bail!("bundle validation failed")
        }
    }
}
