use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Only create the database, skip the configuration wizard
    #[arg(long)]
    no_config: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if !init_args.no_config {
        Config::init()?.save()?;
        msg_success!(Message::ConfigSaved);
    }

    // Opening runs pending migrations.
    Db::new()?;
    Ok(())
}
