//! Snapshot tests for `luma-ir`'s debug dump.
//!
//! Each file under `dumps/` holds the expected text for one IR graph; the
//! graph itself is built in code by [`graphs::build`], keyed by the file
//! stem. `build.rs` generates one `#[test]` per file.

pub mod graphs;

use std::path::Path;

/// The fixed left margin every corpus dump was produced with.
pub const INDENT: usize = 4;

/// Build the graph named by `path`'s file stem, dump it, and compare the
/// text byte-for-byte against the file's contents.
pub fn assert_dump_file(path: &Path) {
    let expected = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_else(|| panic!("bad corpus path: {}", path.display()));

    let (exec, types) = graphs::build(name);
    let actual = exec.dump(&types, INDENT).to_string();

    assert_eq!(
        actual,
        expected,
        "dump of `{}` diverged from {}",
        name,
        path.display(),
    );

    // Dumping the same graph twice must produce identical text.
    assert_eq!(actual, exec.dump(&types, INDENT).to_string());
}

#[cfg(test)]
mod tests {
    include!(concat!(env!("OUT_DIR"), "/", "dump_tests.rs"));
}
