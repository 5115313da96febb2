//! Generate per-directory Terrafiles.

use super::common::CommandContext;
use crate::manifest::{Terrafile, TerrafileModule};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::collections::BTreeMap;
use tracing::debug;

/// Output format for `generate --dry-run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML, in the same shape as the Terrafiles themselves
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Scan the tree and write the merged Terrafile of every directory that
/// imports git modules.
#[derive(Args, Debug, Default)]
pub struct GenerateCommand {
    /// Print the merged Terrafiles instead of writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for `--dry-run`.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl GenerateCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails on scan errors, unparsable existing Terrafiles, and write errors.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let terrafiles = ctx.terrafiles()?;
        let non_empty: Vec<&Terrafile> = terrafiles.values().filter(|t| !t.is_empty()).collect();

        if self.dry_run {
            println!("{}", render(&non_empty, self.format)?);
            return Ok(());
        }

        for terrafile in &non_empty {
            terrafile.save()?;
            ctx.report(format!(
                "{} {} ({} module(s))",
                "Wrote".green(),
                terrafile.path.display(),
                terrafile.modules.len()
            ));
        }

        debug!(
            "Skipped {} director(ies) without git modules",
            terrafiles.len() - non_empty.len()
        );
        if non_empty.is_empty() {
            ctx.report("No git module sources found");
        }
        Ok(())
    }
}

/// Render Terrafiles as a mapping from Terrafile path to its modules.
fn render(terrafiles: &[&Terrafile], format: OutputFormat) -> Result<String> {
    let document: BTreeMap<String, &BTreeMap<String, TerrafileModule>> = terrafiles
        .iter()
        .map(|terrafile| (terrafile.path.display().to_string(), &terrafile.modules))
        .collect();

    let rendered = match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(&document).context("Failed to render Terrafiles as YAML")?
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(&document).context("Failed to render Terrafiles as JSON")?
        }
    };
    Ok(rendered.trim_end().to_string())
}
