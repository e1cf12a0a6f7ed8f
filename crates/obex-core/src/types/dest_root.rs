//! Validated destination root for bundle extraction.

use crate::ExtractError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// A validated destination root directory.
///
/// Every extracted entry must land strictly below this directory. The root
/// is created if it does not exist and canonicalized exactly once, so all
/// later containment checks compare against a stable absolute path.
///
/// # Security Properties
///
/// `resolve_entry` is the only way to turn an archive entry name into an
/// output path, and it rejects any candidate whose normalized form is not
/// strictly contained in the root. Rejection is a hard failure; offending
/// names are never sanitized into something writable.
///
/// # Examples
///
/// ```no_run
/// use obex_core::types::DestRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = DestRoot::create("/tmp/bundle-output")?;
/// let out = root.resolve_entry("manifests/app.yaml".as_ref())?;
/// assert!(out.starts_with(root.as_path()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestRoot(PathBuf);

impl DestRoot {
    /// Creates the destination root, making the directory if needed.
    ///
    /// The path is canonicalized after creation so that containment checks
    /// are not confused by `.`/`..` segments or symlinked prefixes in the
    /// root itself.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Io` if the directory cannot be created, if
    /// the path exists but is not a directory, or if canonicalization
    /// fails.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;

        if !path.is_dir() {
            return Err(ExtractError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("destination is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ExtractError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize {}: {}", path.display(), e),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Resolves an archive entry name to its output path under this root.
    ///
    /// The raw name is joined onto the root and lexically normalized
    /// (`.` removed, `..` collapsed, nothing touched on disk). The
    /// normalized candidate must keep the root as a strict ancestor:
    /// a name that climbs out via `..`, an absolute name that replaces the
    /// root on join, and a name that collapses to the root itself are all
    /// rejected.
    ///
    /// Returns the normalized absolute output path.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::PathTraversal` naming the joined candidate
    /// path when containment fails.
    pub fn resolve_entry(&self, raw: &Path) -> Result<PathBuf> {
        let candidate = self.0.join(raw);
        let normalized = normalize_lexically(&candidate);

        if normalized == self.0 || !normalized.starts_with(&self.0) {
            return Err(ExtractError::PathTraversal { path: candidate });
        }

        Ok(normalized)
    }

    /// Returns the canonical root path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// Collapses `.` and `..` components without consulting the filesystem.
///
/// Candidate paths do not exist yet, so `canonicalize` cannot be used;
/// `..` at the very top stays at the top (popping past the root is a
/// no-op, which still fails the containment check afterwards).
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }
    normalized
}
