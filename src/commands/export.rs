use super::report::{daily_request, run, week_request};
use crate::{
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
        report::{Dimension, Dimensions, ReportKind, ReportRequest},
        time::parse_date,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    report: ReportKind,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Day of a daily report
    #[arg(short, long, default_value = "today")]
    date: String,

    /// First day of a range report (defaults to --date)
    #[arg(long)]
    from: Option<String>,

    /// Last day of a range report (defaults to --from)
    #[arg(long)]
    to: Option<String>,

    #[arg(long)]
    year: Option<i32>,

    #[arg(long)]
    week: Option<u32>,

    #[arg(long, value_enum, value_delimiter = ',')]
    by: Vec<Dimension>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let request = build_request(&args)?.with_dimensions(Dimensions::of(&args.by));

    msg_info!(Message::ExportingReport(args.report.slug().to_string(), format!("{:?}", args.format)));

    let report = run(&request)?;
    let path = Exporter::new(args.format, args.output, report.kind).export(&report)?;

    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}

fn build_request(args: &ExportArgs) -> Result<ReportRequest> {
    let date = parse_date(&args.date)?;

    Ok(match args.report {
        ReportKind::DailyByTask => daily_request(date, true),
        ReportKind::DailyByStage => daily_request(date, false),
        ReportKind::RangeByProject => {
            let from = args.from.as_deref().map(parse_date).transpose()?.unwrap_or(date);
            let to = args.to.as_deref().map(parse_date).transpose()?.unwrap_or(from);
            ReportRequest::range_by_project(from, to)?
        }
        ReportKind::WeeklyPivot => week_request(args.year, args.week, Local::now().date_naive())?,
    })
}
