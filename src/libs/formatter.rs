//! Display-ready strings for reconstructed shifts.
//!
//! Durations render as `HH:MM` (seconds dropped, negative values as `00:00`)
//! and timestamps as `YYYY-MM-DD HH:MM:SS` in the punch's own offset.
//!
//! ```rust
//! use cxshift::libs::formatter::format_duration;
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&(Duration::hours(8) + Duration::minutes(5))), "08:05");
//! assert_eq!(format_duration(&Duration::minutes(-3)), "00:00");
//! ```

use super::messages::Message;
use super::shift::{Reconstruction, ShiftPair};
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_duration(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// One shift row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedShift {
    pub start: String,
    pub end: String,
    pub duration: String,
    pub punches: usize,
}

impl From<&ShiftPair> for FormattedShift {
    fn from(pair: &ShiftPair) -> Self {
        Self {
            start: format_timestamp(&pair.entry.timestamp),
            end: format_timestamp(&pair.exit.timestamp),
            duration: format_duration(&pair.duration()),
            punches: pair.punch_count,
        }
    }
}

/// A punch without a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedOrphan {
    pub timestamp: String,
    pub note: String,
}

/// Everything printed or exported for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedReport {
    pub workno: String,
    pub name: String,
    pub shifts: Vec<FormattedShift>,
    pub orphans: Vec<FormattedOrphan>,
}

impl FormattedReport {
    pub fn from_reconstruction(workno: &str, name: &str, reconstruction: &Reconstruction) -> Self {
        Self {
            workno: workno.to_owned(),
            name: name.to_owned(),
            shifts: reconstruction.pairs.iter().map(FormattedShift::from).collect(),
            orphans: reconstruction
                .orphans
                .iter()
                .map(|orphan| FormattedOrphan {
                    timestamp: format_timestamp(&orphan.timestamp()),
                    note: Message::MissingPunch.to_string(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.orphans.is_empty()
    }
}
