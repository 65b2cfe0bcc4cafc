use rspotify::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify error: {0}")]
    Spotify(#[from] ClientError),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Search output error: {0}")]
    SearchOutput(#[from] serde_json::Error),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
