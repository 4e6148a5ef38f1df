//! Application configuration initialization command.
//!
//! Runs the interactive setup wizard, or removes the existing configuration
//! when `--delete` is given.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

/// Command-line arguments for the initialization command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating new one
    #[arg(short, long)]
    delete: bool,
}

/// Executes the initialization command.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        Config::delete()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
