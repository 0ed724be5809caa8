use crate::{
    db::{projects::Projects, stages::Stages, tasks::Tasks},
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a task, optionally linked to a project and stage
    Add {
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        stage: Option<i64>,
        name: String,
    },
    /// List tasks
    List,
    /// Delete a task
    Delete { id: i64 },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let mut tasks = Tasks::new()?;

    match args.command {
        TaskCommand::Add { project, stage, name } => {
            if let Some(project_id) = project {
                if Projects::new()?.get_by_id(project_id)?.is_none() {
                    msg_error!(Message::ProjectNotFound(project_id));
                    return Ok(());
                }
            }
            if let Some(stage_id) = stage {
                if Stages::new()?.get_by_id(stage_id)?.is_none() {
                    msg_error!(Message::StageNotFound(stage_id));
                    return Ok(());
                }
            }
            let task = tasks.insert(name.trim(), project, stage)?;
            msg_success!(Message::TaskCreated(task.name));
        }
        TaskCommand::List => {
            let all = tasks.fetch()?;
            if all.is_empty() {
                msg_info!(Message::TasksEmpty);
            } else {
                View::tasks(&all)?;
            }
        }
        TaskCommand::Delete { id } => {
            if tasks.get_by_id(id)?.is_none() {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            }
            if tasks.in_use(id)? {
                msg_error!(Message::TaskInUse(id));
                return Ok(());
            }
            tasks.delete(id)?;
            msg_success!(Message::TaskDeleted(id));
        }
    }

    Ok(())
}
