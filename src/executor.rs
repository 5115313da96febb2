//! Running the external vendoring executable.
//!
//! The executable (normally `terrafile`) reads the `Terrafile` in its working
//! directory and checks the listed modules out under `vendor/modules`. It is
//! run once per manifest directory, one directory at a time, with the
//! standard streams passed through so its progress output reaches the user.
//! The first non-zero exit stops the run.

use crate::core::TerrafileError;
use crate::manifest::Terrafile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Builder for one invocation of the vendoring executable.
///
/// ```rust,no_run
/// use terrafileify_cli::executor::TerrafileCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// TerrafileCommand::new("terrafile").current_dir("envs/prod").execute().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TerrafileCommand {
    /// Executable name or path
    binary: String,
    /// Working directory (defaults to the current directory)
    current_dir: Option<PathBuf>,
}

impl TerrafileCommand {
    /// Command running `binary` with no arguments.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            current_dir: None,
        }
    }

    /// Run in `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Resolve the executable, run it to completion, and check its status.
    ///
    /// # Errors
    ///
    /// - [`TerrafileError::ExecutableNotFound`] if the executable cannot be
    ///   located
    /// - [`TerrafileError::ExecutionFailed`] if it exits unsuccessfully
    /// - an I/O error if it cannot be spawned
    pub async fn execute(self) -> Result<()> {
        let program = which::which(&self.binary).map_err(|e| {
            debug!(target: "executor", "Lookup of {} failed: {e}", self.binary);
            TerrafileError::ExecutableNotFound {
                binary: self.binary.clone(),
            }
        })?;

        let dir_display = self
            .current_dir
            .as_deref()
            .map_or_else(|| ".".to_string(), |dir| dir.display().to_string());

        let mut cmd = Command::new(&program);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());

        debug!(target: "executor", "Executing {} in {dir_display}", program.display());

        let status = cmd
            .status()
            .await
            .with_context(|| format!("Failed to execute {} in {dir_display}", self.binary))?;

        if !status.success() {
            return Err(TerrafileError::ExecutionFailed {
                binary: self.binary,
                dir: dir_display,
                status: status.to_string(),
            }
            .into());
        }

        debug!(target: "executor", "{} completed in {dir_display}", self.binary);
        Ok(())
    }
}

/// Run `binary` in the directory of every Terrafile that exists on disk.
///
/// Terrafiles that have not been written yet are skipped with a warning.
/// Returns the number of directories the executable ran in.
///
/// # Errors
///
/// Stops at the first directory where the executable cannot be run or fails.
pub async fn execute_all<'a>(
    binary: &str,
    terrafiles: impl IntoIterator<Item = &'a Terrafile>,
) -> Result<usize> {
    let mut executed = 0;

    for terrafile in terrafiles {
        if !terrafile.exists_on_disk() {
            warn!(
                "Skipping {}: no Terrafile on disk (run `terrafile-ify generate` first)",
                terrafile.dir().display()
            );
            continue;
        }

        TerrafileCommand::new(binary).current_dir(terrafile.dir()).execute().await?;
        info!("Vendored modules in {}", terrafile.dir().display());
        executed += 1;
    }

    Ok(executed)
}
