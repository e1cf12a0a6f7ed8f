//! Property-based tests for the extraction traversal guard.
//!
//! These tests use proptest to generate arbitrary archive shapes and verify
//! the containment and ordering properties hold across all of them.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use obex_core::ExtractError;
use obex_core::extract_bundle;
use obex_core::test_utils::ZipFixtureBuilder;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Strategy for archive entries that are safe by construction: every entry
/// lands under its own indexed top-level directory, so no generated name
/// can collide with or contain another.
fn safe_entries(max: usize) -> impl Strategy<Value = Vec<(String, String, Vec<u8>)>> {
    prop::collection::vec(
        (
            "[a-z]{1,6}",
            "[a-z]{1,8}",
            prop::collection::vec(any::<u8>(), 0..512),
        ),
        1..max,
    )
}

fn entry_path(index: usize, dir: &str, file: &str) -> String {
    format!("{index}-{dir}/{file}.yaml")
}

proptest! {
    /// Every safe entry produces exactly one result path, in archive order,
    /// strictly inside the destination root, with its payload intact.
    #[test]
    fn prop_safe_entries_extract_in_order(entries in safe_entries(10)) {
        let temp = TempDir::new().unwrap();
        let mut builder = ZipFixtureBuilder::new();
        for (index, (dir, file, data)) in entries.iter().enumerate() {
            builder = builder.add_file(&entry_path(index, dir, file), data);
        }
        let archive = builder.write_to(temp.path().join("bundle.zip"));
        let out = temp.path().join("out");

        let report = extract_bundle(&archive, &out).unwrap();
        let root = out.canonicalize().unwrap();

        prop_assert_eq!(report.paths.len(), entries.len());
        for (path, (index, (dir, file, data))) in
            report.paths.iter().zip(entries.iter().enumerate())
        {
            let expected = root.join(entry_path(index, dir, file));
            prop_assert_eq!(path, &expected);
            prop_assert!(path.starts_with(&root));
            prop_assert_eq!(&fs::read(path).unwrap(), data);
        }
    }

    /// Any entry that climbs past the root with `..` is rejected and the
    /// escaped file never appears outside the root.
    #[test]
    fn prop_parent_escape_rejected(
        prefix in "([a-z]{1,6}/){0,3}",
        name in "[a-z]{1,8}",
    ) {
        let depth = prefix.chars().filter(|c| *c == '/').count();
        let climb = "../".repeat(depth + 1);
        let entry = format!("{prefix}{climb}{name}.txt");

        let temp = TempDir::new().unwrap();
        let archive = ZipFixtureBuilder::new()
            .add_file(&entry, b"escaped")
            .write_to(temp.path().join("bundle.zip"));
        let out = temp.path().join("out");

        let result = extract_bundle(&archive, &out);

        prop_assert!(
            matches!(result, Err(ExtractError::PathTraversal { .. })),
            "entry {} should be rejected", entry
        );
        let escaped = temp.path().join(format!("{name}.txt"));
        prop_assert!(!escaped.exists());
    }

    /// Extracting the same archive into the same root twice succeeds and
    /// produces the same result both times.
    #[test]
    fn prop_double_extraction_idempotent(entries in safe_entries(6)) {
        let temp = TempDir::new().unwrap();
        let mut builder = ZipFixtureBuilder::new();
        for (index, (dir, file, data)) in entries.iter().enumerate() {
            builder = builder.add_file(&entry_path(index, dir, file), data);
        }
        let archive = builder.write_to(temp.path().join("bundle.zip"));
        let out = temp.path().join("out");

        let first = extract_bundle(&archive, &out).unwrap();
        let second = extract_bundle(&archive, &out).unwrap();

        prop_assert_eq!(&first.paths, &second.paths);
        prop_assert_eq!(first.bytes_written, second.bytes_written);
        for (index, (dir, file, data)) in entries.iter().enumerate() {
            let path = out.join(entry_path(index, dir, file));
            prop_assert_eq!(&fs::read(path).unwrap(), data);
        }
    }
}
