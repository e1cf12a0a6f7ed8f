//! Traversal-safe bundle extraction and operator manifest validation.
//!
//! `obex-core` unpacks operator bundle archives (zip) onto disk while
//! guaranteeing that no entry escapes the destination root, and checks the
//! extracted Kubernetes manifests for structural problems.
//!
//! # Examples
//!
//! ```no_run
//! use obex_core::extract_bundle;
//! use obex_core::validate::validate_bundle_dir;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_bundle("bundle.zip", "/output/dir")?;
//! println!("Extracted {} files", report.files_extracted);
//!
//! let validation = validate_bundle_dir("/output/dir")?;
//! for unit in &validation.results {
//!     for error in &unit.errors {
//!         eprintln!("Error: {error}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod report;
pub mod test_utils;
pub mod types;
pub mod validate;

// Re-export main API types
pub use error::ExtractError;
pub use error::Result;
pub use extract::extract_bundle;
pub use extract::extract_bundle_with_progress;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

// Re-export types module for easier access
pub use types::DestRoot;
