//! Validation result types.

use std::fmt;

/// Findings for one logical unit of the bundle.
///
/// A unit is a single manifest during per-object checks, or the bundle as a
/// whole for the cross-manifest checks. Messages keep the order in which
/// the checks ran.
#[derive(Debug, Clone)]
pub struct UnitValidation {
    /// Unit label: an object name, a file path, or `bundle`.
    pub unit: String,
    /// Fatal findings, in check order.
    pub errors: Vec<String>,
    /// Non-fatal findings, in check order.
    pub warnings: Vec<String>,
}

impl UnitValidation {
    /// Creates an empty result for `unit`.
    #[must_use]
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns `true` when the unit produced no errors.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Aggregated validation results for a bundle directory.
#[derive(Debug, Clone, Default)]
pub struct BundleValidation {
    /// Per-unit results: one per manifest file in directory order, then the
    /// bundle-level unit last.
    pub results: Vec<UnitValidation>,
    /// Number of manifest files scanned.
    pub files_scanned: usize,
}

impl BundleValidation {
    /// Total number of errors across all units.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.results.iter().map(|unit| unit.errors.len()).sum()
    }

    /// Total number of warnings across all units.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|unit| unit.warnings.len()).sum()
    }

    /// Returns `true` when no unit produced an error.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.iter().all(UnitValidation::passed)
    }

    /// Overall outcome of the run.
    #[must_use]
    pub fn status(&self) -> ValidationStatus {
        if !self.passed() {
            ValidationStatus::Fail
        } else if self.warning_count() > 0 {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Pass
        }
    }
}

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// No errors and no warnings.
    Pass,
    /// Warnings only.
    Warning,
    /// At least one error.
    Fail,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "passed"),
            Self::Warning => write!(f, "warning"),
            Self::Fail => write!(f, "failed"),
        }
    }
}
