//! Console tables.

use super::formatter::format_hours;
use super::records::{Client, Project, Stage, Task};
use super::report::listing::EntryLine;
use super::report::{Cell, Report};
use anyhow::Result;
use prettytable::{row, Cell as TableCell, Row, Table};

pub struct View {}

impl View {
    /// Prints a report with its title; the grand total is added as a final
    /// row under the last column.
    pub fn report(report: &Report) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(Row::new(report.columns.iter().map(|c| TableCell::new(c)).collect()));
        for row in &report.rows {
            table.add_row(Row::new(row.cells.iter().map(|c| TableCell::new(&Self::cell_text(c))).collect()));
        }

        if let Some(last) = report.columns.len().checked_sub(1) {
            let mut footer = vec![TableCell::new(""); last];
            if let Some(first) = footer.first_mut() {
                *first = TableCell::new("Total");
            }
            footer.push(TableCell::new(&format_hours(report.total_hours)));
            table.add_row(Row::new(footer));
        }

        println!("{}", report.title);
        table.printstd();

        Ok(())
    }

    pub fn entries(entries: &[EntryLine]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["ID", "CLIENT", "PROJECT", "STAGE", "TASK", "START", "END"]);
        for entry in entries {
            table.add_row(row![entry.id, entry.client, entry.project, entry.stage, entry.task, entry.start, entry.end]);
        }
        table.printstd();

        Ok(())
    }

    pub fn clients(clients: &[Client]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["ID", "NAME"]);
        for client in clients {
            table.add_row(row![client.id, client.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn projects(projects: &[Project]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["ID", "CODE", "SUB CODE", "NAME", "CLIENT ID"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.code,
                project.sub_code.as_deref().unwrap_or(""),
                project.name,
                project.client_id
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stages(stages: &[Stage]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["ID", "NAME", "PROJECT ID"]);
        for stage in stages {
            table.add_row(row![stage.id, stage.name, stage.project_id]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.set_titles(row!["ID", "NAME", "PROJECT ID", "STAGE ID"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.name,
                task.project_id.map(|id| id.to_string()).unwrap_or_default(),
                task.stage_id.map(|id| id.to_string()).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn cell_text(cell: &Cell) -> String {
        match cell {
            Cell::Text(text) => text.clone(),
            Cell::Hours(hours) => format_hours(*hours),
        }
    }
}
