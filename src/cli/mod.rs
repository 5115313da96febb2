//! Command-line interface for terrafile-ify.
//!
//! Three mutually exclusive commands cover the vendoring workflow:
//!
//! - `generate` - write a `Terrafile` next to every Terraform configuration
//!   that imports git modules
//! - `rewrite` - point those imports at `./vendor/modules/<name>` in place
//! - `execute` - run the vendoring executable in every directory that has a
//!   `Terrafile`
//!
//! ```bash
//! terrafile-ify generate
//! terrafile-ify execute
//! terrafile-ify rewrite
//! ```
//!
//! Every command scans the same tree with the same [`Config`], built once
//! from the global options by [`Cli::build_config`].

pub mod common;
pub mod execute;
pub mod generate;
pub mod rewrite;

use crate::config::{Config, IgnorePattern};
use crate::constants::{DEFAULT_IGNORE_PATTERN, DEFAULT_TERRAFILE_BINARY};
use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{CommandContext, init_logging};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "terrafile-ify",
    about = "Vendor git-sourced Terraform modules",
    version,
    long_about = "terrafile-ify finds Terraform module blocks that import git repositories, \
                  records them in per-directory Terrafiles, and rewrites the imports to \
                  point at the vendored copies."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory to scan for Terraform sources.
    #[arg(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    directory: PathBuf,

    /// Glob for files and directories to leave out of the scan.
    ///
    /// Matched against both the full path and the base name, so the default
    /// prunes every `.terraform` directory in the tree.
    #[arg(
        long,
        global = true,
        value_name = "GLOB",
        env = "TERRAFILE_IFY_IGNORE",
        default_value = DEFAULT_IGNORE_PATTERN
    )]
    ignore: String,

    /// Vendoring executable run by `execute`.
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        env = "TERRAFILE_BINARY",
        default_value = DEFAULT_TERRAFILE_BINARY
    )]
    terrafile_binary: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a Terrafile for every directory that imports git modules.
    ///
    /// Entries already present in a Terrafile are kept as they are.
    Generate(generate::GenerateCommand),

    /// Rewrite git module sources to their vendored paths in place.
    Rewrite(rewrite::RewriteCommand),

    /// Run the vendoring executable in every directory with a Terrafile.
    Execute(execute::ExecuteCommand),
}

impl Cli {
    /// Install logging, build the run configuration, and dispatch.
    ///
    /// # Errors
    ///
    /// Returns the first error of the selected command.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.log_level());
        let config = self.build_config()?;
        let ctx = CommandContext::new(config, self.quiet);

        match self.command {
            Commands::Generate(cmd) => cmd.execute(&ctx).await,
            Commands::Rewrite(cmd) => cmd.execute(&ctx).await,
            Commands::Execute(cmd) => cmd.execute(&ctx).await,
        }
    }

    /// Log level forced by `--verbose` or `--quiet`.
    ///
    /// `None` leaves the choice to `RUST_LOG`.
    #[must_use]
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Run configuration for the global options.
    ///
    /// # Errors
    ///
    /// Fails if `--ignore` is not a valid glob.
    pub fn build_config(&self) -> Result<Config> {
        Ok(Config::new(&self.directory)
            .with_ignore(IgnorePattern::new(&self.ignore)?)
            .with_terrafile_binary(&self.terrafile_binary))
    }
}
