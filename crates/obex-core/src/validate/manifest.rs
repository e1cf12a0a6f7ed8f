//! Manifest discovery and parsing.

use serde_yaml::Value;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

pub(crate) const KIND_CSV: &str = "ClusterServiceVersion";
pub(crate) const KIND_CRD: &str = "CustomResourceDefinition";

/// One parsed manifest file from a bundle directory.
///
/// The commonly inspected identity fields are pre-extracted; `doc` keeps the
/// full document for deeper lookups.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Path of the file, relative to the bundle directory.
    pub path: PathBuf,
    /// Top-level `apiVersion`, when present.
    pub api_version: Option<String>,
    /// Top-level `kind`, when present.
    pub kind: Option<String>,
    /// `metadata.name`, when present.
    pub name: Option<String>,
    /// The full parsed document.
    pub doc: Value,
}

impl Manifest {
    /// Parses YAML text into a manifest.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error when the text is not a
    /// single well-formed YAML document.
    pub fn parse(path: PathBuf, text: &str) -> Result<Self, serde_yaml::Error> {
        let doc: Value = serde_yaml::from_str(text)?;
        let api_version = string_at(&doc, &["apiVersion"]);
        let kind = string_at(&doc, &["kind"]);
        let name = string_at(&doc, &["metadata", "name"]);
        Ok(Self {
            path,
            api_version,
            kind,
            name,
            doc,
        })
    }

    /// Unit label: the object name when present, else the file path.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Whether this is a package manifest (registry layout, not an object).
    #[must_use]
    pub fn is_package(&self) -> bool {
        self.doc.get("packageName").is_some()
    }

    /// Whether this manifest is a ClusterServiceVersion.
    #[must_use]
    pub fn is_csv(&self) -> bool {
        self.kind.as_deref() == Some(KIND_CSV)
    }

    /// Whether this manifest is a CustomResourceDefinition.
    #[must_use]
    pub fn is_crd(&self) -> bool {
        self.kind.as_deref() == Some(KIND_CRD)
    }
}

/// Navigates nested mappings and returns the value at `path`.
pub(crate) fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Returns the string at `path`, when present and a string.
pub(crate) fn string_at(doc: &Value, path: &[&str]) -> Option<String> {
    lookup(doc, path).and_then(Value::as_str).map(str::to_owned)
}

/// Lists manifest files (`*.yaml` / `*.yml`) under `dir`.
///
/// The walk order is sorted by file name per directory level, so results
/// are deterministic across runs.
pub(crate) fn manifest_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_yaml = matches!(
            entry.path().extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        if is_yaml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
