//! Writing reports and raw punches to files.
//!
//! Shift reports go to CSV with one row per shift or orphan. Raw punch records
//! go to pretty-printed JSON exactly as the service returned them. Both land in
//! the data directory under the account name unless an explicit path is given:
//!
//! - `exports/<account>.csv`
//! - `downloads/<account>.json`

use super::data_storage::DataStorage;
use super::formatter::FormattedReport;
use crate::api::PunchRecord;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const EXPORTS_DIR: &str = "exports";
const DOWNLOADS_DIR: &str = "downloads";

/// What a CSV row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Shift,
    Orphan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRow {
    pub workno: String,
    pub name: String,
    pub kind: RowKind,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub punches: usize,
}

impl ShiftRow {
    /// Shift rows first, then orphan rows, for one worker.
    pub fn from_report(report: &FormattedReport) -> Vec<ShiftRow> {
        let shifts = report.shifts.iter().map(|shift| ShiftRow {
            workno: report.workno.clone(),
            name: report.name.clone(),
            kind: RowKind::Shift,
            start: shift.start.clone(),
            end: shift.end.clone(),
            duration: shift.duration.clone(),
            punches: shift.punches,
        });
        let orphans = report.orphans.iter().map(|orphan| ShiftRow {
            workno: report.workno.clone(),
            name: report.name.clone(),
            kind: RowKind::Orphan,
            start: orphan.timestamp.clone(),
            end: String::new(),
            duration: String::new(),
            punches: 1,
        });
        shifts.chain(orphans).collect()
    }
}

pub struct Exporter {}

impl Exporter {
    pub fn default_csv_path(storage: &DataStorage, account_name: &str) -> Result<PathBuf> {
        storage.get_path(&format!("{}/{}.csv", EXPORTS_DIR, account_name))
    }

    pub fn default_json_path(storage: &DataStorage, account_name: &str) -> Result<PathBuf> {
        storage.get_path(&format!("{}/{}.json", DOWNLOADS_DIR, account_name))
    }

    /// Writes every report to `path` and returns the number of data rows.
    pub fn shifts_csv(path: &Path, reports: &[FormattedReport]) -> Result<usize> {
        create_parent(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        let mut rows = 0;

        // Headers come from the first serialized row; write them explicitly
        // so an empty export still has them
        if reports.iter().all(FormattedReport::is_empty) {
            writer.write_record(["workno", "name", "kind", "start", "end", "duration", "punches"])?;
        }
        for report in reports {
            for row in ShiftRow::from_report(report) {
                writer.serialize(row)?;
                rows += 1;
            }
        }
        writer.flush()?;

        Ok(rows)
    }

    /// Writes the raw records to `path` and returns how many there were.
    pub fn punches_json(path: &Path, records: &[PunchRecord]) -> Result<usize> {
        create_parent(path)?;
        let json = serde_json::to_string_pretty(records)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(records.len())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
