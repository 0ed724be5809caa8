use crate::{
    db::{clients::Clients, projects::Projects},
    libs::{messages::Message, records::Project, view::View},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Add a project for a client
    Add {
        #[arg(long)]
        client: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        sub_code: Option<String>,
        name: String,
    },
    /// Change a project's codes, name or client
    Edit {
        id: i64,
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        code: Option<String>,
        /// An empty value clears the sub code
        #[arg(long)]
        sub_code: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// List projects
    List,
    /// Delete a project that has no stages or tasks
    Delete { id: i64 },
}

pub fn cmd(args: ProjectArgs) -> Result<()> {
    let mut projects = Projects::new()?;

    match args.command {
        ProjectCommand::Add {
            client,
            code,
            sub_code,
            name,
        } => {
            if Clients::new()?.get_by_id(client)?.is_none() {
                msg_error!(Message::ClientNotFound(client));
                return Ok(());
            }

            let project = projects.insert(&Project {
                id: 0,
                code: code.trim().to_string(),
                sub_code: sub_code.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
                name: name.trim().to_string(),
                client_id: client,
            })?;
            msg_success!(Message::ProjectCreated(project.label()));
        }
        ProjectCommand::Edit {
            id,
            client,
            code,
            sub_code,
            name,
        } => {
            let Some(mut project) = projects.get_by_id(id)? else {
                msg_error!(Message::ProjectNotFound(id));
                return Ok(());
            };
            if let Some(client_id) = client {
                if Clients::new()?.get_by_id(client_id)?.is_none() {
                    msg_error!(Message::ClientNotFound(client_id));
                    return Ok(());
                }
                project.client_id = client_id;
            }
            if let Some(code) = code {
                project.code = code.trim().to_string();
            }
            if let Some(sub_code) = sub_code {
                project.sub_code = Some(sub_code.trim().to_string()).filter(|s| !s.is_empty());
            }
            if let Some(name) = name {
                project.name = name.trim().to_string();
            }
            projects.update(&project)?;
            msg_success!(Message::ProjectUpdated(project.label()));
        }
        ProjectCommand::List => {
            let all = projects.fetch()?;
            if all.is_empty() {
                msg_info!(Message::ProjectsEmpty);
            } else {
                View::projects(&all)?;
            }
        }
        ProjectCommand::Delete { id } => {
            if projects.get_by_id(id)?.is_none() {
                msg_error!(Message::ProjectNotFound(id));
                return Ok(());
            }
            if projects.in_use(id)? {
                msg_error!(Message::ProjectInUse(id));
                return Ok(());
            }
            projects.delete(id)?;
            msg_success!(Message::ProjectDeleted(id));
        }
    }

    Ok(())
}
