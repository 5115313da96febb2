//! Run the vendoring executable per Terrafile directory.

use super::common::CommandContext;
use crate::executor::execute_all;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Scan the tree and run the vendoring executable in every directory whose
/// Terrafile has been written.
#[derive(Args, Debug, Default)]
pub struct ExecuteCommand {}

impl ExecuteCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails on scan errors and on the first directory where the executable
    /// is missing or exits unsuccessfully.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let terrafiles = ctx.terrafiles()?;
        let executed = execute_all(&ctx.config.terrafile_binary, terrafiles.values()).await?;

        if executed == 0 {
            ctx.report("No Terrafiles to vendor; run `terrafile-ify generate` first");
        } else {
            ctx.report(format!(
                "{} modules in {executed} director(ies)",
                "Vendored".green()
            ));
        }
        Ok(())
    }
}
