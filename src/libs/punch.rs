//! Punch events and the timestamp boundary.
//!
//! Raw `checktime` strings from the attendance API are turned into typed
//! [`PunchEvent`]s here. Anything that does not parse is rejected with
//! [`CxError::InvalidTimestamp`] and never reaches the shift reconstructor.

use crate::api::crosschex::PunchRecord;
use crate::libs::{error::CxError, messages::Message};
use crate::msg_warning;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Offset-aware layouts tried after RFC 3339.
const OFFSET_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Offset-less layouts, read in the configured device offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single check-in or check-out of one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchEvent {
    pub timestamp: DateTime<FixedOffset>,
    pub worker_identifier: String,
    pub worker_name: String,
}

impl PunchEvent {
    pub fn new(timestamp: DateTime<FixedOffset>, worker_identifier: &str, worker_name: &str) -> Self {
        Self {
            timestamp,
            worker_identifier: worker_identifier.to_owned(),
            worker_name: worker_name.to_owned(),
        }
    }

    /// Builds a punch from raw API fields.
    ///
    /// `checktime` without an explicit offset is interpreted in
    /// `default_offset`.
    pub fn parse(workno: &str, name: &str, checktime: &str, default_offset: FixedOffset) -> Result<Self, CxError> {
        let timestamp = parse_timestamp(checktime, default_offset)?;
        Ok(Self::new(timestamp, workno, name))
    }

    pub fn from_record(record: &PunchRecord, default_offset: FixedOffset) -> Result<Self, CxError> {
        Self::parse(&record.workno, &record.name, &record.checktime, default_offset)
    }
}

/// Parses an ISO-8601 date-time, with or without a UTC offset.
pub fn parse_timestamp(raw: &str, default_offset: FixedOffset) -> Result<DateTime<FixedOffset>, CxError> {
    let value = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp);
    }
    if let Some(timestamp) = OFFSET_FORMATS.iter().find_map(|format| DateTime::parse_from_str(value, format).ok()) {
        return Ok(timestamp);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| default_offset.from_local_datetime(&naive).single())
        .ok_or_else(|| CxError::InvalidTimestamp(raw.to_owned()))
}

/// Parses a `+HH:MM` / `-HH:MM` offset (a bare `Z` means UTC).
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match value.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((hours, minutes)) => (hours, minutes),
        None if rest.len() == 4 => rest.split_at_checked(2)?,
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Converts fetched records into punches, leaving out (and reporting) every
/// record whose `checktime` is unreadable.
pub fn parse_records(records: &[PunchRecord], default_offset: FixedOffset) -> Vec<PunchEvent> {
    records
        .iter()
        .filter_map(|record| match PunchEvent::from_record(record, default_offset) {
            Ok(punch) => Some(punch),
            Err(error) => {
                msg_warning!(Message::PunchSkipped {
                    workno: record.workno.clone(),
                    error: error.to_string(),
                });
                None
            }
        })
        .collect()
}
