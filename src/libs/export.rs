//! Writes reports to CSV, JSON or Excel files.
//!
//! Every format carries the report's columns in order. Hour cells stay
//! numeric in JSON and Excel; CSV writes them with two decimals.
//!
//! ```rust,no_run
//! use timesheet::libs::export::{ExportFormat, Exporter};
//! use timesheet::libs::report::ReportRequest;
//! use timesheet::db::{db::Db, snapshot};
//!
//! let request = ReportRequest::weekly_pivot(2024, 10)?;
//! let report = request.run(&snapshot::load(&Db::new()?, request.filter())?)?;
//! Exporter::new(ExportFormat::Csv, None, report.kind).export(&report)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::formatter::format_hours;
use super::report::{Cell, Report, ReportKind};
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named
    /// `timesheet_<kind>_<YYYYmmdd_HHMMSS>.<ext>` in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, kind: ReportKind) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "timesheet_{}_{}.{}",
                kind.slug(),
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `report` and returns the path written.
    pub fn export(&self, report: &Report) -> Result<PathBuf> {
        debug!(path = %self.output_path.display(), format = ?self.format, rows = report.rows.len(), "Exporting report");

        match self.format {
            ExportFormat::Csv => self.export_csv(report)?,
            ExportFormat::Json => self.export_json(report)?,
            ExportFormat::Excel => self.export_excel(report)?,
        }

        Ok(self.output_path.clone())
    }

    fn export_csv(&self, report: &Report) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(&report.columns)?;
        for row in &report.rows {
            wtr.write_record(row.cells.iter().map(|cell| match cell {
                Cell::Text(text) => text.clone(),
                Cell::Hours(hours) => format_hours(*hours),
            }))?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, report: &Report) -> Result<()> {
        let rows: Vec<Value> = report
            .rows
            .iter()
            .map(|row| -> Result<Value, serde_json::Error> {
                let object: Map<String, Value> = report
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.cells.iter().map(serde_json::to_value))
                    .map(|(column, value)| value.map(|v| (column, v)))
                    .collect::<Result<_, _>>()?;
                Ok(Value::Object(object))
            })
            .collect::<Result<_, _>>()?;

        let json = serde_json::to_string_pretty(&rows)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_excel(&self, report: &Report) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let hours_format = Format::new().set_num_format("0.00");

        for (col, column) in report.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, column, &header_format)?;
        }

        let mut row = 1;
        for report_row in &report.rows {
            for (col, cell) in report_row.cells.iter().enumerate() {
                match cell {
                    Cell::Text(text) => worksheet.write_string(row, col as u16, text)?,
                    Cell::Hours(hours) => worksheet.write_number_with_format(row, col as u16, *hours, &hours_format)?,
                };
            }
            row += 1;
        }

        worksheet.autofit();

        workbook.save(&self.output_path)?;
        Ok(())
    }
}
