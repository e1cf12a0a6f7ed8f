//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::HumanBytes;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use obex_core::ProgressCallback;
use std::path::Path;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Displays an entry-count progress bar with a running byte total when
/// attached to a TTY. The bar length is learned from the first entry
/// callback. Cleans up automatically on drop.
pub struct CliProgress {
    bar: ProgressBar,
    message: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Extracting (1.2 MiB) [████████░░░░] 42/100 (3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_owned());

        Self {
            bar,
            message: message.to_owned(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_message(format!(
            "{} ({})",
            self.message,
            HumanBytes(self.bytes_written)
        ));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback_tracks_entries_and_bytes() {
        let mut progress = CliProgress::new("Extracting");

        progress.on_entry_start(Path::new("a.yaml"), 3, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("a.yaml"));

        assert_eq!(progress.bytes_written, 1024);
        assert_eq!(progress.bar.position(), 1);
        assert_eq!(progress.bar.length(), Some(3));

        progress.on_complete();
    }
}
