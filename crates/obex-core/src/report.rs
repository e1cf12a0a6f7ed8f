//! Extraction reporting and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a bundle extraction.
///
/// `paths` is the primary result: the absolute output path of every entry,
/// one per entry, in archive order. Directory entries appear alongside
/// files. The counters summarize what was materialized on disk.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Output path of every entry, in archive order.
    pub paths: Vec<PathBuf>,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.paths.len()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// Implement this trait to receive progress updates. The trait requires
/// `Send` to allow use in multi-threaded contexts.
///
/// # Examples
///
/// ```
/// use obex_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, bytes: u64) {
///         // Track bytes written
///     }
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {
///         println!("Extraction complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to process an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Output path of the entry being processed
    /// * `total` - Total number of entries in the archive
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called when bytes are written during extraction.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Number of bytes written in this update
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    ///
    /// # Arguments
    ///
    /// * `path` - Output path of the entry that was completed
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire extraction is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback` that does nothing.
///
/// Use this when you don't need progress reporting but the API requires
/// a callback implementation.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new();
        assert!(report.paths.is_empty());
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.directories_created, 0);
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_total_entries_counts_paths() {
        let mut report = ExtractionReport::new();
        report.paths.push(PathBuf::from("/out/dir"));
        report.paths.push(PathBuf::from("/out/dir/a.txt"));
        report.files_extracted = 1;
        report.directories_created = 1;
        assert_eq!(report.total_entries(), 2);
    }
}
