//! Traversal-safe bundle extraction.
//!
//! The extractor walks a zip archive entry by entry, in archive order, and
//! materializes each entry under a canonicalized destination root. The raw
//! stored name of every entry is checked for containment before anything is
//! written; pre-sanitizing names would hide the offending path, so the check
//! sees them verbatim and rejects escapes outright. The first violation or
//! I/O failure aborts the call. Output already on disk stays there.

use crate::DestRoot;
use crate::ExtractError;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::ZipArchive;

/// Mode for file entries that carry no unix permissions.
#[cfg(unix)]
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Extracts a bundle archive into `dest`.
///
/// Equivalent to [`extract_bundle_with_progress`] with no progress
/// reporting.
///
/// # Examples
///
/// ```no_run
/// use obex_core::extract_bundle;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_bundle("bundle.zip", "/tmp/bundle-output")?;
/// for path in &report.paths {
///     println!("{}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// See [`extract_bundle_with_progress`].
pub fn extract_bundle(
    archive: impl AsRef<Path>,
    dest: impl AsRef<Path>,
) -> Result<ExtractionReport> {
    extract_bundle_with_progress(archive, dest, &mut NoopProgress)
}

/// Extracts a bundle archive into `dest`, reporting progress per entry.
///
/// The destination root is created if absent and canonicalized once. Each
/// entry is then processed in archive order:
///
/// - its stored name is resolved against the root, rejecting any name whose
///   normalized form is not strictly contained in it;
/// - the resolved path is recorded in the report whether the entry is a
///   directory or a file;
/// - directory entries are created with default permissions, file entries
///   are written through create + truncate with their stored mode bits, so
///   colliding names overwrite earlier output.
///
/// Per-entry file handles are released at the end of each entry's scope.
/// The archive handle is held for the whole call and released on every exit
/// path.
///
/// # Errors
///
/// - [`ExtractError::Open`] when the archive cannot be read or is not a
///   valid zip file.
/// - [`ExtractError::PathTraversal`] when an entry escapes the destination
///   root. Extraction stops at the offending entry; earlier output is not
///   rolled back.
/// - [`ExtractError::Io`] for any filesystem failure mid-extraction.
pub fn extract_bundle_with_progress(
    archive: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive.as_ref();
    let start = Instant::now();

    let file = File::open(archive_path).map_err(|e| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source: e.into(),
    })?;
    let mut zip = ZipArchive::new(file).map_err(|e| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let root = DestRoot::create(dest.as_ref())?;
    let total = zip.len();
    let mut report = ExtractionReport::new();

    for index in 0..total {
        let mut entry = zip.by_index(index).map_err(read_error)?;
        let out_path = root.resolve_entry(&PathBuf::from(entry.name()))?;

        progress.on_entry_start(&out_path, total, index + 1);
        report.paths.push(out_path.clone());

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            report.directories_created += 1;
            progress.on_entry_complete(&out_path);
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(entry.unix_mode().map_or(DEFAULT_FILE_MODE, |m| m & 0o7777));
        }

        let mut out_file = options.open(&out_path)?;
        let written = io::copy(&mut entry, &mut out_file)?;

        report.bytes_written += written;
        report.files_extracted += 1;
        progress.on_bytes_written(written);
        progress.on_entry_complete(&out_path);
        // entry and out_file drop here, before the next entry is touched
    }

    progress.on_complete();
    report.duration = start.elapsed();
    Ok(report)
}

/// Maps a zip read failure on an already-open archive to an I/O error.
fn read_error(e: zip::result::ZipError) -> ExtractError {
    match e {
        zip::result::ZipError::Io(io_err) => ExtractError::Io(io_err),
        other => ExtractError::Io(io::Error::new(io::ErrorKind::InvalidData, other)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipFixtureBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_missing_archive_is_open_error() {
        let temp = TempDir::new().unwrap();
        let result = extract_bundle(temp.path().join("missing.zip"), temp.path().join("out"));
        assert!(matches!(result, Err(ExtractError::Open { .. })));
    }

    #[test]
    fn test_garbage_archive_is_open_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("garbage.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let result = extract_bundle(&archive, temp.path().join("out"));
        match result {
            Err(ExtractError::Open { path, .. }) => assert_eq!(path, archive),
            other => panic!("expected Open error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_archive_extracts_nothing() {
        let temp = TempDir::new().unwrap();
        let archive = ZipFixtureBuilder::new().write_to(temp.path().join("empty.zip"));

        let report = extract_bundle(&archive, temp.path().join("out")).unwrap();
        assert!(report.paths.is_empty());
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_progress_callbacks_fire_per_entry() {
        struct Counting {
            started: usize,
            completed: usize,
            finished: bool,
        }

        impl ProgressCallback for Counting {
            fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {
                self.started += 1;
            }
            fn on_bytes_written(&mut self, _bytes: u64) {}
            fn on_entry_complete(&mut self, _path: &Path) {
                self.completed += 1;
            }
            fn on_complete(&mut self) {
                self.finished = true;
            }
        }

        let temp = TempDir::new().unwrap();
        let archive = ZipFixtureBuilder::new()
            .add_directory("manifests/")
            .add_file("manifests/csv.yaml", b"kind: ClusterServiceVersion")
            .write_to(temp.path().join("bundle.zip"));

        let mut progress = Counting {
            started: 0,
            completed: 0,
            finished: false,
        };
        extract_bundle_with_progress(&archive, temp.path().join("out"), &mut progress).unwrap();

        assert_eq!(progress.started, 2);
        assert_eq!(progress.completed, 2);
        assert!(progress.finished);
    }
}
