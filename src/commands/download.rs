//! Raw punch download.
//!
//! Saves every punch record in range as the service returned it, to
//! `downloads/<account>.json` in the data directory unless `--output` is
//! given.

use super::shifts::RangeArgs;
use crate::{
    api::CrossChex,
    libs::{config::Config, data_storage::DataStorage, export::Exporter, fetch::collect_punches, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: DownloadArgs) -> Result<()> {
    let config = Config::read()?;
    let crosschex = config.crosschex()?;
    let query = args.range.query()?;

    let mut client = CrossChex::new(crosschex)?;
    client.connect().await?;

    let records = collect_punches(&mut client, &query).await;
    if records.is_empty() {
        msg_info!(Message::NothingToExport);
        return Ok(());
    }

    let path = match args.output {
        Some(path) => path,
        None => Exporter::default_json_path(&DataStorage::new(), &crosschex.account_name)?,
    };
    let count = Exporter::punches_json(&path, &records)?;

    msg_success!(Message::DownloadCompleted {
        records: count,
        path: path.display().to_string(),
    });
    Ok(())
}
