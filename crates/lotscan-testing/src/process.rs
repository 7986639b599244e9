//! CLI process harness: each test gets an isolated data directory and a
//! pre-wired `lotscan` command.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    /// Root of the isolated workspace (also the CLI data directory).
    pub fn data_dir(&self) -> &Path {
        self.temp.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp.path().join("labels.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    /// Directory for placeholder camera images.
    pub fn images_dir(&self) -> PathBuf {
        self.temp.path().join("images")
    }

    /// Directory for canned replay replies.
    pub fn replies_dir(&self) -> PathBuf {
        self.temp.path().join("replies")
    }

    /// A `lotscan` command pointed at this workspace via LOTSCAN_PATH.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("lotscan").expect("lotscan binary should build");
        cmd.env("LOTSCAN_PATH", self.temp.path());
        cmd.env_remove("HOME");
        cmd
    }
}
