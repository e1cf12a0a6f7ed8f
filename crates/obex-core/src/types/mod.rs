//! Validated filesystem types used during extraction.

mod dest_root;

pub use dest_root::DestRoot;
