//! Rewrite git module sources to vendored paths.

use super::common::CommandContext;
use crate::core::TerrafileError;
use crate::reference::ReplacementMap;
use crate::rewrite::Rewriter;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::debug;

/// Scan the tree and rewrite every git module source that has a vendored
/// target.
#[derive(Args, Debug, Default)]
pub struct RewriteCommand {
    /// Report files that would change and fail if there are any, without
    /// writing.
    #[arg(long)]
    pub check: bool,
}

impl RewriteCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails on scan or rewrite errors, and in `--check` mode when any file
    /// would change.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let result = ctx.scan()?;
        let replacements = ReplacementMap::from_references(&result.references);
        debug!("{} vendored target(s)", replacements.len());
        for (key, target) in replacements.iter() {
            debug!("{key} -> {}", target.vendored_path);
        }

        let rewriter = Rewriter::new(&replacements);
        let mut changed = Vec::new();

        for path in &result.files {
            let touched = if self.check {
                rewriter.check_file(path)?
            } else {
                rewriter.rewrite_file(path)?
            };

            if touched {
                changed.push(path);
            }
        }

        if self.check {
            for path in &changed {
                println!("{}", path.display());
            }
            if !changed.is_empty() {
                return Err(TerrafileError::Other {
                    message: format!("{} file(s) would be rewritten", changed.len()),
                }
                .into());
            }
            return Ok(());
        }

        for path in &changed {
            ctx.report(format!("{} {}", "Rewrote".green(), path.display()));
        }
        if changed.is_empty() {
            ctx.report("All module sources are up to date");
        }
        Ok(())
    }
}
