use crate::{
    db::clients::Clients,
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Debug, Subcommand)]
enum ClientCommand {
    /// Add a client
    Add { name: String },
    /// List clients
    List,
    /// Delete a client that has no projects
    Delete { id: i64 },
}

pub fn cmd(args: ClientArgs) -> Result<()> {
    let mut clients = Clients::new()?;

    match args.command {
        ClientCommand::Add { name } => {
            let client = clients.insert(name.trim())?;
            msg_success!(Message::ClientCreated(client.name));
        }
        ClientCommand::List => {
            let all = clients.fetch()?;
            if all.is_empty() {
                msg_info!(Message::ClientsEmpty);
            } else {
                View::clients(&all)?;
            }
        }
        ClientCommand::Delete { id } => {
            if clients.get_by_id(id)?.is_none() {
                msg_error!(Message::ClientNotFound(id));
                return Ok(());
            }
            if clients.in_use(id)? {
                msg_error!(Message::ClientInUse(id));
                return Ok(());
            }
            clients.delete(id)?;
            msg_success!(Message::ClientDeleted(id));
        }
    }

    Ok(())
}
