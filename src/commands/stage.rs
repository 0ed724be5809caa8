use crate::{
    db::{projects::Projects, stages::Stages},
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct StageArgs {
    #[command(subcommand)]
    command: StageCommand,
}

#[derive(Debug, Subcommand)]
enum StageCommand {
    /// Add a stage to a project
    Add {
        #[arg(long)]
        project: i64,
        name: String,
    },
    /// Rename a stage or move it to another project
    Edit {
        id: i64,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// List stages, optionally of one project
    List {
        #[arg(long)]
        project: Option<i64>,
    },
    /// Delete a stage that has no time entries
    Delete { id: i64 },
}

pub fn cmd(args: StageArgs) -> Result<()> {
    let mut stages = Stages::new()?;

    match args.command {
        StageCommand::Add { project, name } => {
            if Projects::new()?.get_by_id(project)?.is_none() {
                msg_error!(Message::ProjectNotFound(project));
                return Ok(());
            }
            let stage = stages.insert(name.trim(), project)?;
            msg_success!(Message::StageCreated(stage.name));
        }
        StageCommand::Edit { id, project, name } => {
            let Some(mut stage) = stages.get_by_id(id)? else {
                msg_error!(Message::StageNotFound(id));
                return Ok(());
            };
            if let Some(project_id) = project {
                if Projects::new()?.get_by_id(project_id)?.is_none() {
                    msg_error!(Message::ProjectNotFound(project_id));
                    return Ok(());
                }
                stage.project_id = project_id;
            }
            if let Some(name) = name {
                stage.name = name.trim().to_string();
            }
            stages.update(&stage)?;
            msg_success!(Message::StageUpdated(stage.name));
        }
        StageCommand::List { project } => {
            let all = match project {
                Some(project_id) => stages.fetch_by_project(project_id)?,
                None => stages.fetch()?,
            };
            if all.is_empty() {
                msg_info!(Message::StagesEmpty);
            } else {
                View::stages(&all)?;
            }
        }
        StageCommand::Delete { id } => {
            if stages.get_by_id(id)?.is_none() {
                msg_error!(Message::StageNotFound(id));
                return Ok(());
            }
            if stages.in_use(id)? {
                msg_error!(Message::StageInUse(id));
                return Ok(());
            }
            stages.delete(id)?;
            msg_success!(Message::StageDeleted(id));
        }
    }

    Ok(())
}
