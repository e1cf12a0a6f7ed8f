//! Test utilities for building bundle archive fixtures.
//!
//! # Panics
//!
//! All helpers in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Builder for zip archive fixtures.
///
/// Entry names are written verbatim, so fixtures can carry hostile names
/// like `../evil.txt` that a well-formed archive would never contain.
///
/// # Examples
///
/// ```
/// use obex_core::test_utils::ZipFixtureBuilder;
///
/// let zip_data = ZipFixtureBuilder::new()
///     .add_directory("manifests/")
///     .add_file("manifests/app.yaml", b"kind: Deployment")
///     .build();
/// ```
pub struct ZipFixtureBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipFixtureBuilder {
    /// Creates a new fixture builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the zip archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`, returning the path.
    pub fn write_to(self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for ZipFixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an in-memory zip archive from a list of `(path, content)` pairs.
///
/// Files are stored uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use obex_core::test_utils::create_bundle_zip;
///
/// let zip_data = create_bundle_zip(vec![("a.yaml", b"kind: Foo"), ("dir/b.txt", b"x")]);
/// ```
#[must_use]
pub fn create_bundle_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut builder = ZipFixtureBuilder::new();
    for (path, data) in entries {
        builder = builder.add_file(path, data);
    }
    builder.build()
}

/// Writes a manifest file under `dir`, creating parent directories.
pub fn write_manifest(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, yaml).unwrap();
    path
}
