use crate::{
    api::CrossChex,
    libs::{config::Config, fetch::collect_workers, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WorkersArgs {
    /// Only workers whose number or name matches
    #[arg(short, long, default_value = "")]
    keyword: String,
}

pub async fn cmd(args: WorkersArgs) -> Result<()> {
    let config = Config::read()?;
    let mut client = CrossChex::new(config.crosschex()?)?;
    client.connect().await?;

    let workers = collect_workers(&mut client, &args.keyword).await;
    if workers.is_empty() {
        msg_info!(Message::NoWorkersFound);
        return Ok(());
    }

    msg_print!(Message::WorkersHeader(workers.len()), true);
    View::workers(&workers)
}
