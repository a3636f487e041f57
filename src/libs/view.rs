use super::formatter::FormattedReport;
use super::messages::Message;
use crate::api::crosschex::Company;
use crate::api::WorkerRecord;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    /// One worker's shifts, headed by a red name line, with orphans in yellow.
    pub fn shifts(report: &FormattedReport) -> Result<()> {
        let header = Message::EmployeeHeader {
            name: report.name.clone(),
            workno: report.workno.clone(),
        };

        let mut table = Table::new();
        table.set_titles(Row::new(vec![Cell::new(&header.to_string()).style_spec("Frb").with_hspan(5)]));
        table.add_row(row!["#", "START", "END", "DURATION", "PUNCHES"]);
        for (index, shift) in report.shifts.iter().enumerate() {
            table.add_row(row![index + 1, shift.start, shift.end, shift.duration, shift.punches]);
        }
        for orphan in &report.orphans {
            table.add_row(row!["", Fy->orphan.timestamp, "", "", Fy->orphan.note]);
        }
        table.printstd();

        Ok(())
    }

    pub fn workers(workers: &[WorkerRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["WORKNO", "NAME"]);
        for worker in workers {
            table.add_row(row![worker.workno, worker.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn companies(companies: &[Company]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for company in companies {
            table.add_row(row![company.id, company.name.as_deref().unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }
}
