//! CSV export of reconstructed shifts.
//!
//! Runs the same worker loop as `shifts` and writes one row per shift or
//! missing punch. The file goes to `exports/<account>.csv` in the data
//! directory unless `--output` is given.

use super::shifts::{fetch_reports, RangeArgs};
use crate::{
    libs::{config::Config, data_storage::DataStorage, export::Exporter, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Grouping window in hours, overriding the configured one
    #[arg(long)]
    window: Option<i64>,

    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let reports = fetch_reports(&args.range, args.window).await?;
    if reports.is_empty() {
        msg_info!(Message::NothingToExport);
        return Ok(());
    }

    let path = match args.output {
        Some(path) => path,
        None => Exporter::default_csv_path(&DataStorage::new(), &Config::read()?.crosschex()?.account_name)?,
    };
    let rows = Exporter::shifts_csv(&path, &reports)?;

    msg_success!(Message::ExportCompleted {
        rows,
        path: path.display().to_string(),
    });
    Ok(())
}
