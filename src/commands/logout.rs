use crate::{
    api::CrossChex,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let crosschex = config.crosschex.unwrap_or_default();

    CrossChex::new(&crosschex)?.logout()?;

    msg_success!(Message::LoggedOut);
    Ok(())
}
