use crate::{
    db::{db::Db, entries::Entries, snapshot, stages::Stages, tasks::Tasks},
    libs::{
        config::{Config, EntryConfig},
        formatter::{format_clock, format_duration},
        messages::Message,
        records::TimeEntry,
        report::{listing::list_entries, EntryFilter},
        time::{parse_date, parse_time, snap_to_increment, snap_up_to_increment},
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Debug, Subcommand)]
enum EntryCommand {
    /// Log a finished interval
    Add {
        #[arg(long)]
        stage: i64,
        #[arg(long)]
        task: Option<i64>,
        #[arg(short, long, default_value = "today")]
        date: String,
        /// HH:MM; defaults to the end of the day's latest entry
        #[arg(long)]
        start: Option<String>,
        /// HH:MM; defaults to one increment after the start
        #[arg(long)]
        end: Option<String>,
    },
    /// Open an entry at the current time
    Start {
        #[arg(long)]
        stage: i64,
        #[arg(long)]
        task: Option<i64>,
    },
    /// Close the running entry
    Stop,
    /// Change an existing entry
    Edit {
        id: i64,
        #[arg(long)]
        stage: Option<i64>,
        #[arg(long, conflicts_with = "clear_task")]
        task: Option<i64>,
        #[arg(long)]
        clear_task: bool,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete an entry
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// List the entries of a day
    List {
        #[arg(short, long, default_value = "today")]
        date: String,
    },
}

pub fn cmd(args: EntryArgs) -> Result<()> {
    let config = Config::read()?.entry();

    match args.command {
        EntryCommand::Add {
            stage,
            task,
            date,
            start,
            end,
        } => handle_add(&config, stage, task, &date, start.as_deref(), end.as_deref()),
        EntryCommand::Start { stage, task } => handle_start(&config, stage, task),
        EntryCommand::Stop => handle_stop(&config),
        EntryCommand::Edit {
            id,
            stage,
            task,
            clear_task,
            date,
            start,
            end,
        } => {
            let task = if clear_task { Some(None) } else { task.map(Some) };
            handle_edit(&config, id, stage, task, date.as_deref(), start.as_deref(), end.as_deref())
        }
        EntryCommand::Delete { id, yes } => handle_delete(id, yes),
        EntryCommand::List { date } => print_day(parse_date(&date)?),
    }
}

/// Resolves the interval of a new entry on `date`.
///
/// Without an explicit start the entry continues from `latest_end`, or from
/// the configured start of the day. Without an explicit end it lasts one
/// increment. Both ends are snapped down to the increment.
pub fn plan_interval(
    date: NaiveDate,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    latest_end: Option<NaiveDateTime>,
    config: &EntryConfig,
) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let increment = config.time_increment_minutes;

    let start = match (start, latest_end) {
        (Some(time), _) => date.and_time(time),
        (None, Some(latest)) => latest,
        (None, None) => date.and_time(config.default_start_time()?),
    };
    let start = snap_to_increment(start, increment);

    let end = match end {
        Some(time) => snap_to_increment(date.and_time(time), increment),
        None => start + Duration::minutes(i64::from(increment)),
    };

    ensure_ordered(start, end)?;
    Ok((start, end))
}

fn ensure_ordered(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= start {
        msg_bail_anyhow!(Message::EntryEndNotAfterStart(format_clock(&start), format_clock(&end)));
    }
    Ok(())
}

/// Checks that the stage and the optional task exist.
fn references_exist(stage: i64, task: Option<i64>) -> Result<bool> {
    if Stages::new()?.get_by_id(stage)?.is_none() {
        msg_error!(Message::StageNotFound(stage));
        return Ok(false);
    }
    if let Some(task_id) = task {
        if Tasks::new()?.get_by_id(task_id)?.is_none() {
            msg_error!(Message::TaskNotFound(task_id));
            return Ok(false);
        }
    }
    Ok(true)
}

fn handle_add(config: &EntryConfig, stage: i64, task: Option<i64>, date: &str, start: Option<&str>, end: Option<&str>) -> Result<()> {
    if !references_exist(stage, task)? {
        return Ok(());
    }

    let date = parse_date(date)?;
    let start = start.map(parse_time).transpose()?;
    let end = end.map(parse_time).transpose()?;

    let mut entries = Entries::new()?;
    let latest_end = entries.fetch_latest(date)?.and_then(|e| e.end);
    let (start, end) = plan_interval(date, start, end, latest_end, config)?;

    let id = entries.insert(&TimeEntry {
        id: 0,
        user_id: config.user_id,
        stage_id: stage,
        task_id: task,
        start,
        end: Some(end),
    })?;

    msg_success!(Message::EntryAdded(id, format_clock(&start), format_clock(&end)));
    Ok(())
}

fn handle_start(config: &EntryConfig, stage: i64, task: Option<i64>) -> Result<()> {
    let mut entries = Entries::new()?;
    if let Some(open) = entries.fetch_open(config.user_id)? {
        msg_error!(Message::EntryAlreadyOpen(open.id));
        return Ok(());
    }
    if !references_exist(stage, task)? {
        return Ok(());
    }

    let start = snap_to_increment(Local::now().naive_local(), config.time_increment_minutes);
    let id = entries.insert(&TimeEntry {
        id: 0,
        user_id: config.user_id,
        stage_id: stage,
        task_id: task,
        start,
        end: None,
    })?;

    msg_success!(Message::EntryStarted(id, format_clock(&start)));
    Ok(())
}

fn handle_stop(config: &EntryConfig) -> Result<()> {
    let mut entries = Entries::new()?;
    let Some(open) = entries.fetch_open(config.user_id)? else {
        msg_info!(Message::NoOpenEntry);
        return Ok(());
    };

    let end = snap_up_to_increment(Local::now().naive_local(), config.time_increment_minutes);
    ensure_ordered(open.start, end)?;
    entries.close(open.id, end)?;

    msg_success!(Message::EntryStopped(open.id, format_duration(&(end - open.start))));
    Ok(())
}

fn handle_edit(
    config: &EntryConfig,
    id: i64,
    stage: Option<i64>,
    task: Option<Option<i64>>,
    date: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let mut entries = Entries::new()?;
    let Some(mut entry) = entries.get_by_id(id)? else {
        msg_error!(Message::EntryNotFound(id));
        return Ok(());
    };

    if let Some(stage_id) = stage {
        entry.stage_id = stage_id;
    }
    if let Some(task_id) = task {
        entry.task_id = task_id;
    }
    if !references_exist(entry.stage_id, entry.task_id)? {
        return Ok(());
    }

    let increment = config.time_increment_minutes;
    let date = date.map(parse_date).transpose()?;
    let start = start.map(parse_time).transpose()?;
    let end = end.map(parse_time).transpose()?;
    let day = date.unwrap_or_else(|| entry.start.date());

    if date.is_some() || start.is_some() {
        let time = start.unwrap_or_else(|| entry.start.time());
        entry.start = snap_to_increment(day.and_time(time), increment);
    }
    if date.is_some() || end.is_some() {
        entry.end = end
            .or_else(|| entry.end.map(|e| e.time()))
            .map(|time| snap_to_increment(day.and_time(time), increment));
    }

    if let Some(end) = entry.end {
        ensure_ordered(entry.start, end)?;
    }

    entries.update(&entry)?;
    msg_success!(Message::EntryUpdated(id));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let mut entries = Entries::new()?;
    if entries.get_by_id(id)?.is_none() {
        msg_error!(Message::EntryNotFound(id));
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEntry(id).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        entries.delete(id)?;
        msg_success!(Message::EntryDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

/// Prints the entry listing of `date`.
pub fn print_day(date: NaiveDate) -> Result<()> {
    let filter = EntryFilter::Date(date);
    let snapshot = snapshot::load(&Db::new()?, &filter)?;
    let lines = list_entries(&snapshot, &filter);

    let day = date.format("%Y-%m-%d").to_string();
    if lines.is_empty() {
        msg_info!(Message::NoEntriesForDate(day));
        return Ok(());
    }

    msg_print!(Message::EntriesHeader(day), true);
    View::entries(&lines)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_first_entry_of_day_starts_at_default_start() {
        let (start, end) = plan_interval(day(), None, None, None, &EntryConfig::default()).unwrap();
        assert_eq!(start, day().and_time(hm(9, 0)));
        assert_eq!(end, day().and_time(hm(9, 15)));
    }

    #[test]
    fn test_continues_from_latest_entry() {
        let latest = day().and_time(hm(11, 30));
        let (start, end) = plan_interval(day(), None, Some(hm(12, 0)), Some(latest), &EntryConfig::default()).unwrap();
        assert_eq!(start, latest);
        assert_eq!(end, day().and_time(hm(12, 0)));
    }

    #[test]
    fn test_explicit_times_are_snapped() {
        let (start, end) = plan_interval(day(), Some(hm(9, 7)), Some(hm(10, 59)), None, &EntryConfig::default()).unwrap();
        assert_eq!(start, day().and_time(hm(9, 0)));
        assert_eq!(end, day().and_time(hm(10, 45)));
    }

    #[test]
    fn test_rejects_end_not_after_start() {
        let config = EntryConfig::default();
        assert!(plan_interval(day(), Some(hm(10, 0)), Some(hm(10, 0)), None, &config).is_err());
        assert!(plan_interval(day(), Some(hm(10, 0)), Some(hm(9, 0)), None, &config).is_err());
        // 10:05 snaps down to 10:00
        assert!(plan_interval(day(), Some(hm(10, 0)), Some(hm(10, 5)), None, &config).is_err());
    }

    #[test]
    fn test_respects_configured_increment() {
        let config = EntryConfig {
            time_increment_minutes: 30,
            default_start: "08:00".to_string(),
            user_id: 1,
        };
        let (start, end) = plan_interval(day(), None, None, None, &config).unwrap();
        assert_eq!(start, day().and_time(hm(8, 0)));
        assert_eq!(end, day().and_time(hm(8, 30)));
    }
}
