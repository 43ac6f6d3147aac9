#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use csv::ReaderBuilder;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Binary under test with `RUST_LOG` cleared so stderr only carries diagnostics.
pub fn book_reorder() -> Command {
    let mut command = Command::cargo_bin("book-reorder").expect("binary exists");
    command.env_remove("RUST_LOG");
    command
}

/// Parses CSV text written by the tool into its raw records.
pub fn parse_records(output: &[u8]) -> Vec<Vec<String>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(output)
        .records()
        .map(|record| {
            record
                .expect("output record")
                .iter()
                .map(|field| field.to_string())
                .collect()
        })
        .collect()
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }

    /// Writes `rows` as CSV (ragged rows allowed) and returns the path.
    pub fn write_rows(&self, name: &str, rows: &[Vec<String>]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .expect("create csv writer");
        for row in rows {
            writer.write_record(row).expect("write csv row");
        }
        writer.flush().expect("flush csv writer");
        path
    }
}
