pub mod companies;
pub mod download;
pub mod export;
pub mod init;
pub mod logout;
pub mod shifts;
pub mod workers;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List the companies on the account")]
    Companies,
    #[command(about = "List workers")]
    Workers(workers::WorkersArgs),
    #[command(about = "Reconstruct and display shifts", arg_required_else_help = true)]
    Shifts(shifts::ShiftsArgs),
    #[command(about = "Reconstruct shifts and write them to CSV", arg_required_else_help = true)]
    Export(export::ExportArgs),
    #[command(about = "Save raw punch records as JSON", arg_required_else_help = true)]
    Download(download::DownloadArgs),
    #[command(about = "Forget the cached session and stored password")]
    Logout,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Companies => companies::cmd().await,
            Commands::Workers(args) => workers::cmd(args).await,
            Commands::Shifts(args) => shifts::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            Commands::Download(args) => download::cmd(args).await,
            Commands::Logout => logout::cmd(),
        }
    }
}
