//! Error conversion utilities for CLI.
//!
//! Converts obex-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use obex_core::ExtractError;
use std::path::Path;

/// Converts `ExtractError` to a user-friendly anyhow error with context
pub fn convert_extract_error(err: ExtractError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractError::PathTraversal { path } => {
            anyhow!(
                "Security violation: archive '{}' attempted path traversal with '{}'\n\
                 HINT: This bundle may be malicious. Do not extract bundles from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        ExtractError::Open { path, source } => {
            anyhow!(
                "Cannot open archive '{}': {}\n\
                 HINT: The file may be missing, corrupted, or not a zip archive.",
                path.display(),
                source
            )
        }
        ExtractError::Io(io_err) => {
            anyhow!(
                "I/O error while extracting '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds bundle context to a core extraction result
pub fn add_bundle_context<T>(
    result: Result<T, ExtractError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extract_error(e, archive))
}
