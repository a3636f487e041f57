use crate::{
    api::CrossChex,
    libs::{config::Config, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let mut client = CrossChex::new(config.crosschex()?)?;
    client.connect().await?;

    let companies = client.companies().await?;
    if companies.is_empty() {
        msg_info!(Message::NoCompaniesFound);
        return Ok(());
    }

    msg_print!(Message::CompaniesHeader, true);
    View::companies(&companies)
}
