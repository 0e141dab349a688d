use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Epsilon for distance comparisons in tests.
const DISTANCE_EPSILON: f64 = 1.0e-9;

/// Temporary directory holding fixture documents for one scenario.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|err| {
            panic!("failed to create temporary fixture directory: {err}");
        });
        Self { dir }
    }

    pub fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temporary directory is not UTF-8: {path:?}"))
    }

    /// Write `contents` to `name` inside the directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root().join(name);
        write_file(&path, contents);
        path
    }
}

fn write_file(path: &Utf8Path, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|err| {
        panic!("failed to write fixture {path}: {err}");
    });
}

/// Compare distances within a small epsilon.
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= DISTANCE_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}
