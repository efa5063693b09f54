// Example configuration command

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use launchpad_sdk::LaunchpadConfig;

use super::utils::{info, success};

#[derive(Args)]
pub struct InitConfigCmd {
    /// Where to write the configuration
    #[arg(long, default_value = "launchpad.toml")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn execute(cmd: &InitConfigCmd) -> Result<()> {
    if cmd.output.exists() && !cmd.force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            cmd.output.display()
        );
    }

    LaunchpadConfig::write_example(&cmd.output)?;
    success(&format!("Wrote {}", cmd.output.display()));
    info("Set LAUNCHPAD__PINNING__JWT before uploading images");
    Ok(())
}
