use super::entry::print_day;
use crate::{
    db::{db::Db, snapshot},
    libs::{
        formatter::format_hours,
        messages::Message,
        report::{Dimension, Dimensions, IsoWeek, Report, ReportRequest},
        time::parse_date,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    command: ReportCommand,

    /// Group by these dimensions instead of the report's defaults
    #[arg(long, value_enum, value_delimiter = ',', global = true)]
    by: Vec<Dimension>,
}

#[derive(Debug, Subcommand)]
enum ReportCommand {
    /// Entries and hours for today
    Today {
        #[arg(long)]
        by_task: bool,
    },
    /// Entries and hours for yesterday
    Yesterday {
        #[arg(long)]
        by_task: bool,
    },
    /// Entries and hours for a given day (YYYY-MM-DD)
    Day {
        date: String,
        #[arg(long)]
        by_task: bool,
    },
    /// Hours per client and project over an inclusive date range
    Range { from: String, to: String },
    /// Hours per weekday for an ISO week (defaults to the current week)
    Week {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        week: Option<u32>,
    },
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let dimensions = Dimensions::of(&args.by);
    let today = Local::now().date_naive();

    match args.command {
        ReportCommand::Today { by_task } => daily(today, by_task, dimensions),
        ReportCommand::Yesterday { by_task } => daily(today - Duration::days(1), by_task, dimensions),
        ReportCommand::Day { date, by_task } => daily(parse_date(&date)?, by_task, dimensions),
        ReportCommand::Range { from, to } => {
            let request = ReportRequest::range_by_project(parse_date(&from)?, parse_date(&to)?)?;
            print_report(&run(&request.with_dimensions(dimensions))?)
        }
        ReportCommand::Week { year, week } => print_report(&run(&week_request(year, week, today)?.with_dimensions(dimensions))?),
    }
}

pub fn daily_request(date: NaiveDate, by_task: bool) -> ReportRequest {
    if by_task {
        ReportRequest::daily_by_task(date)
    } else {
        ReportRequest::daily_by_stage(date)
    }
}

/// Both `year` and `week`, or neither for the week containing `today`.
pub fn week_request(year: Option<i32>, week: Option<u32>, today: NaiveDate) -> Result<ReportRequest> {
    match (year, week) {
        (Some(year), Some(week)) => Ok(ReportRequest::weekly_pivot(year, week)?),
        (None, None) => {
            let current = IsoWeek::containing(today);
            Ok(ReportRequest::weekly_pivot(current.year, current.week)?)
        }
        _ => msg_bail_anyhow!(Message::WeekRequiresYear),
    }
}

/// Loads what `request` needs from the database and runs it.
pub fn run(request: &ReportRequest) -> Result<Report> {
    let snapshot = snapshot::load(&Db::new()?, request.filter())?;
    Ok(request.run(&snapshot)?)
}

fn daily(date: NaiveDate, by_task: bool, dimensions: Dimensions) -> Result<()> {
    print_day(date)?;
    print_report(&run(&daily_request(date, by_task).with_dimensions(dimensions))?)
}

fn print_report(report: &Report) -> Result<()> {
    if report.is_empty() {
        msg_info!(Message::ReportEmpty(report.title.clone()));
    } else {
        msg_print!("");
        View::report(report)?;
        msg_print!(Message::ReportTotal(format_hours(report.total_hours)));
    }

    if report.open_entries > 0 {
        msg_warning!(Message::OpenEntriesExcluded(report.open_entries));
    }
    if report.dangling_entries > 0 {
        msg_warning!(Message::DanglingEntriesUnassigned(report.dangling_entries));
    }

    Ok(())
}
