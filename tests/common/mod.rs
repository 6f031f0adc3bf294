#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Scratch directory with its own dataset store; cleaned up on drop.
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

    /// Directory the CLI is pointed at for dataset storage.
    pub fn store_dir(&self) -> PathBuf {
        self.temp_dir.path().join("store")
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// A `chartdeck` invocation bound to this workspace's store, run from the
    /// workspace so no stray config file is picked up.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("chartdeck").expect("binary exists");
        cmd.current_dir(self.path())
            .env_remove("CHARTDECK_OWNER")
            .env_remove("RUST_LOG")
            .arg("--store")
            .arg(self.store_dir());
        cmd
    }

    /// Runs `upload` for `contents` and returns the new dataset id.
    pub fn upload(&self, file_name: &str, contents: &str) -> String {
        let input = self.write(file_name, contents);
        let output = self
            .command()
            .args(["upload", "-i", input.to_str().unwrap()])
            .output()
            .expect("run upload");
        assert!(
            output.status.success(),
            "upload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        first_field(&output.stdout)
    }
}

/// The dataset id printed as the first tab-separated field of a command.
pub fn first_field(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .split('\t')
        .next()
        .expect("id field")
        .trim()
        .to_string()
}
