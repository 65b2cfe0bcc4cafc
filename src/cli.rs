use clap::{Parser, Subcommand};
use log::info;
use rgrabber::clients::errors::Result;

use crate::session;

#[derive(Parser)]
#[command(name = "rgrabber")]
#[command(version, about = "Download tracks from your Spotify playlists via YouTube", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Download {},
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Download {} => {
            download_tracks().await?;
        }
    }
    Ok(())
}

async fn download_tracks() -> Result<()> {
    info!("Building config ...");
    let config = session::ConfigBuilder::new().build()?;
    info!("Authorizing Spotify client ...");
    // A CLI prompt may be shown on this call
    config.spotify.authorize_client().await?;
    let session = session::Session::new(config);
    session.run().await
}
