//! Error types for bundle extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractError`.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting a bundle archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Archive cannot be read from disk or is not a valid zip file.
    #[error("cannot open archive {path}: {source}")]
    Open {
        /// Path of the archive that failed to open.
        path: PathBuf,
        /// Underlying open or parse failure.
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry would land outside the destination root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The candidate output path that escaped the root.
        path: PathBuf,
    },

    /// Filesystem operation failed mid-extraction.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use obex_core::ExtractError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractError::PathTraversal {
    ///     path: PathBuf::from("/out/../evil.txt"),
    /// };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns the path of the entry that triggered the error, if any.
    #[must_use]
    pub fn offending_path(&self) -> Option<&PathBuf> {
        match self {
            Self::PathTraversal { path } | Self::Open { path, .. } => Some(path),
            Self::Io(_) => None,
        }
    }
}
