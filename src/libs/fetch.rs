//! Page loops over an [`AttendanceSource`].
//!
//! Pages are requested from 1 upwards until the reported page count is
//! reached. The page count is re-read from every response. A failed request
//! comes back as an empty page with a page count of zero, which ends the loop
//! with whatever was collected so far.

use super::punch::{parse_records, PunchEvent};
use crate::api::{AttendanceSource, PunchQuery, PunchRecord, WorkerRecord};
use chrono::FixedOffset;

/// Every worker matching `keyword`.
pub async fn collect_workers<S: AttendanceSource>(source: &mut S, keyword: &str) -> Vec<WorkerRecord> {
    let mut workers = Vec::new();
    let mut page = 1;

    loop {
        let result = source.fetch_workers(page, keyword).await;
        workers.extend(result.items);
        if page >= result.page_count {
            break;
        }
        page += 1;
    }

    workers
}

/// Every raw punch record matching `query`.
pub async fn collect_punches<S: AttendanceSource>(source: &mut S, query: &PunchQuery) -> Vec<PunchRecord> {
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let result = source.fetch_punches(page, query).await;
        records.extend(result.items);
        if page >= result.page_count {
            break;
        }
        page += 1;
    }

    records
}

/// Every punch matching `query`, parsed. Records with unreadable timestamps
/// are reported and skipped.
pub async fn collect_punch_events<S: AttendanceSource>(source: &mut S, query: &PunchQuery, default_offset: FixedOffset) -> Vec<PunchEvent> {
    let records = collect_punches(source, query).await;
    parse_records(&records, default_offset)
}
