//! Bundle manifest validation.
//!
//! Validates the Kubernetes manifests of an extracted operator bundle.
//! Findings are grouped per logical unit (one unit per manifest file, plus
//! a bundle-level unit for the cross-manifest checks) and ordered, so their
//! presentation is deterministic. Broken manifests produce unit errors, not
//! hard failures; only an unusable bundle directory aborts the run.

mod manifest;
mod report;
mod rules;

pub use manifest::Manifest;
pub use report::BundleValidation;
pub use report::UnitValidation;
pub use report::ValidationStatus;

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures while validating a bundle directory.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Bundle directory is missing or not a directory.
    #[error("bundle directory not found: {path}")]
    MissingDir {
        /// The path that was expected to be a directory.
        path: PathBuf,
    },

    /// Filesystem failure while listing or reading manifests.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates every manifest under `dir`.
///
/// Scans for `*.yaml` / `*.yml` files in deterministic order, runs the
/// per-object checks on each, then the bundle-level checks across all of
/// them. The returned results hold one unit per file in scan order followed
/// by the bundle-level unit.
///
/// # Examples
///
/// ```no_run
/// use obex_core::validate::validate_bundle_dir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validation = validate_bundle_dir("/tmp/bundle-output")?;
/// for unit in &validation.results {
///     for error in &unit.errors {
///         eprintln!("Error: {error}");
///     }
///     for warning in &unit.warnings {
///         eprintln!("Warning: {warning}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`ValidationError::MissingDir`] when `dir` is not a directory
/// and [`ValidationError::Io`] when the walk or a file read fails.
pub fn validate_bundle_dir(dir: impl AsRef<Path>) -> Result<BundleValidation, ValidationError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ValidationError::MissingDir {
            path: dir.to_path_buf(),
        });
    }

    let files = manifest::manifest_files(dir)?;
    let mut results = Vec::with_capacity(files.len() + 1);
    let mut manifests = Vec::new();

    for path in &files {
        let rel = path.strip_prefix(dir).unwrap_or(path).to_path_buf();
        let label = rel.display().to_string();
        let bytes = fs::read(path)?;

        let Ok(text) = String::from_utf8(bytes) else {
            let mut unit = UnitValidation::new(label);
            unit.errors.push("manifest is not valid UTF-8".to_owned());
            results.push(unit);
            continue;
        };

        match Manifest::parse(rel, &text) {
            Ok(parsed) => {
                results.push(rules::check_manifest(&parsed));
                manifests.push(parsed);
            }
            Err(e) => {
                let mut unit = UnitValidation::new(label);
                unit.errors.push(format!("could not parse manifest: {e}"));
                results.push(unit);
            }
        }
    }

    results.push(rules::check_bundle(dir, &manifests, files.is_empty()));

    Ok(BundleValidation {
        results,
        files_scanned: files.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_manifest;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_is_hard_error() {
        let temp = TempDir::new().unwrap();
        let result = validate_bundle_dir(temp.path().join("nope"));
        assert!(matches!(result, Err(ValidationError::MissingDir { .. })));
    }

    #[test]
    fn test_empty_dir_reports_bundle_error() {
        let temp = TempDir::new().unwrap();
        let validation = validate_bundle_dir(temp.path()).unwrap();

        assert_eq!(validation.files_scanned, 0);
        assert_eq!(validation.results.len(), 1);
        assert!(validation.results[0].errors[0].contains("no manifest files found"));
    }

    #[test]
    fn test_broken_yaml_is_a_unit_error() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "broken.yaml", "kind: [unclosed");

        let validation = validate_bundle_dir(temp.path()).unwrap();
        let unit = &validation.results[0];
        assert_eq!(unit.unit, "broken.yaml");
        assert!(unit.errors[0].contains("could not parse manifest"));
    }

    #[test]
    fn test_non_yaml_files_ignored() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "README.md", "# not yaml");
        write_manifest(temp.path(), "notes.txt", "scratch");

        let validation = validate_bundle_dir(temp.path()).unwrap();
        assert_eq!(validation.files_scanned, 0);
    }

    #[test]
    fn test_results_keep_file_order() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "a.yaml", "kind: Alpha\napiVersion: v1");
        write_manifest(temp.path(), "b.yaml", "kind: Beta\napiVersion: v1");

        let validation = validate_bundle_dir(temp.path()).unwrap();
        assert_eq!(validation.results.len(), 3);
        assert_eq!(validation.results[0].unit, "a.yaml");
        assert_eq!(validation.results[1].unit, "b.yaml");
    }
}
