//! Shift reconstruction command.
//!
//! For every worker in range (or just the one given with `--worker`) the
//! punches are fetched, rebuilt into shifts and printed. Workers without
//! punches are skipped. The same worker loop feeds the CSV export.

use crate::{
    api::{AttendanceSource, CrossChex, PunchQuery},
    libs::{
        config::Config,
        fetch::{collect_punch_events, collect_workers},
        formatter::FormattedReport,
        messages::Message,
        shift::{reconstruct_with_window, window_from_hours},
        view::View,
    },
    msg_bail_anyhow, msg_debug, msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Duration, FixedOffset, NaiveDate};
use clap::Args;

/// Date range and filters shared by the commands that read punches.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(short, long)]
    pub from: NaiveDate,

    /// Last day (inclusive), YYYY-MM-DD
    #[arg(short, long)]
    pub to: NaiveDate,

    /// Only this worker number
    #[arg(short, long)]
    pub worker: Option<String>,

    /// Department id, 0 for all
    #[arg(short, long, default_value_t = 0)]
    pub department: i64,
}

impl RangeArgs {
    pub fn query(&self) -> Result<PunchQuery> {
        if self.from > self.to {
            msg_bail_anyhow!(Message::InvalidDateRange {
                from: self.from.to_string(),
                to: self.to.to_string(),
            });
        }
        Ok(PunchQuery::new(self.worker.as_deref().unwrap_or(""), self.from, self.to, self.department))
    }
}

#[derive(Debug, Args)]
pub struct ShiftsArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Grouping window in hours, overriding the configured one
    #[arg(long)]
    pub window: Option<i64>,
}

/// The grouping window: the flag if given, the configuration otherwise.
pub fn resolve_window(flag: Option<i64>, config: &Config) -> Result<Duration> {
    match flag {
        Some(hours) => match window_from_hours(hours) {
            Some(window) => Ok(window),
            None => msg_bail_anyhow!(Message::InvalidWindow(hours)),
        },
        None => config.shift_window(),
    }
}

/// Builds one report per worker that has punches in `query`'s range.
///
/// With `worker` set only the worker with exactly that number is used, since
/// the service's keyword search also returns partial matches.
pub async fn worker_reports<S: AttendanceSource>(
    source: &mut S,
    query: &PunchQuery,
    worker: Option<&str>,
    window: Duration,
    default_offset: FixedOffset,
) -> Vec<FormattedReport> {
    let workers = collect_workers(source, worker.unwrap_or("")).await;
    let mut reports = Vec::new();

    for record in workers.iter().filter(|record| worker.is_none_or(|workno| record.workno == workno)) {
        let punches: Vec<_> = collect_punch_events(source, &query.for_keyword(&record.workno), default_offset)
            .await
            .into_iter()
            .filter(|punch| punch.worker_identifier == record.workno)
            .collect();

        if punches.is_empty() {
            msg_debug!(Message::NoPunchesForWorker(record.workno.clone()));
            continue;
        }

        let reconstruction = reconstruct_with_window(punches, window);
        reports.push(FormattedReport::from_reconstruction(&record.workno, &record.name, &reconstruction));
    }

    reports
}

/// Connects and runs [`worker_reports`] with the configured client.
pub async fn fetch_reports(range: &RangeArgs, window: Option<i64>) -> Result<Vec<FormattedReport>> {
    let config = Config::read()?;
    let window = resolve_window(window, &config)?;
    let query = range.query()?;

    let mut client = CrossChex::new(config.crosschex()?)?;
    client.connect().await?;

    let offset = client.offset();
    Ok(worker_reports(&mut client, &query, range.worker.as_deref(), window, offset).await)
}

pub async fn cmd(args: ShiftsArgs) -> Result<()> {
    let reports = fetch_reports(&args.range, args.window).await?;
    if reports.is_empty() {
        msg_info!(Message::NoWorkersFound);
        return Ok(());
    }

    for report in &reports {
        View::shifts(report)?;
    }

    msg_print!(
        Message::ShiftsSummary {
            workers: reports.len(),
            shifts: reports.iter().map(|report| report.shifts.len()).sum(),
            orphans: reports.iter().map(|report| report.orphans.len()).sum(),
        },
        true
    );
    Ok(())
}
