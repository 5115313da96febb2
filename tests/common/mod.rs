//! Shared helpers for the integration suite.
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary Terraform tree plus a way to run the binary against it.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        terrafileify_cli::test_utils::init_test_logging(None);
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Path of `relative` inside the project
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }

    /// Write a file into the project, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file from the project
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
    }

    /// Command for the binary, running in the project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("terrafile-ify").expect("binary is built for tests");
        cmd.current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("TERRAFILE_IFY_IGNORE")
            .env_remove("TERRAFILE_BINARY");
        cmd
    }

    /// Install an executable shell script standing in for `terrafile`.
    ///
    /// The script appends its working directory to `calls.log` in the
    /// temporary root, then exits with `exit_code`.
    #[cfg(unix)]
    pub fn fake_terrafile(&self, exit_code: i32) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let root = self.project_dir.parent().context("project has a parent")?;
        let log = root.join("calls.log");
        let script = root.join("fake-terrafile");
        fs::write(
            &script,
            format!("#!/bin/sh\npwd >> '{}'\nexit {exit_code}\n", log.display()),
        )?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        Ok(script)
    }

    /// Directories the fake `terrafile` ran in, in call order
    pub fn terrafile_calls(&self) -> Vec<PathBuf> {
        let Some(root) = self.project_dir.parent() else {
            return Vec::new();
        };
        fs::read_to_string(root.join("calls.log"))
            .map(|log| log.lines().map(PathBuf::from).collect())
            .unwrap_or_default()
    }
}

/// A `module` block sourced from `git::<url>`, optionally pinned.
pub fn git_module(name: &str, url: &str, revision: Option<&str>) -> String {
    terrafileify_cli::test_utils::fixtures::git_module(name, url, revision)
}
