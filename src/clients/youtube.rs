use std::env;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use tokio::process::Command;

use crate::clients::errors::{Error, Result};

/// Audio format requested from the extraction pipeline.
const AUDIO_FORMAT: &str = "mp3";
/// Target bitrate handed to the transcoder.
const AUDIO_QUALITY: &str = "192K";

/// One search result as printed by yt-dlp in flat-playlist JSON mode.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

/// Search and download client backed by the yt-dlp binary.
pub struct YoutubeClient {
    binary: String,
}

impl YoutubeClient {
    pub fn new(binary: impl Into<String>) -> Self {
        YoutubeClient {
            binary: binary.into(),
        }
    }

    // Create a YoutubeClient from the environment, defaulting to yt-dlp on PATH
    pub fn from_env() -> Self {
        let binary = env::var("YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string());
        YoutubeClient::new(binary)
    }

    /// Query the video search for the top `max_results` candidates.
    ///
    /// Uses yt-dlp's `ytsearchN:` pseudo-url with one JSON document per
    /// candidate on stdout. Candidates are returned in the order the service
    /// ranked them.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>> {
        let target = format!("ytsearch{max_results}:{query}");
        debug!("Searching with {}: {target}", self.binary);

        let output = Command::new(&self.binary)
            .args(["--dump-json", "--flat-playlist", "--no-warnings"])
            .arg(&target)
            .output()
            .await
            .map_err(|e| Error::Search(format!("failed to run {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Search(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }

    /// Extract the audio of `url` into `output_path`.
    ///
    /// Audio-only extraction, transcoded to a fixed codec and bitrate. The
    /// subprocess writes the file itself; a non-zero exit is surfaced as a
    /// download error with the captured stderr.
    pub async fn download_audio(&self, url: &str, output_path: &Path) -> Result<()> {
        debug!("Downloading {url} with {}", self.binary);

        let output = Command::new(&self.binary)
            .args(["--extract-audio", "--audio-format", AUDIO_FORMAT])
            .args(["--audio-quality", AUDIO_QUALITY])
            .args(["--no-playlist", "--quiet", "--no-warnings"])
            .arg("-o")
            .arg(output_path)
            .arg(url)
            .output()
            .await
            .map_err(|e| Error::Download(format!("failed to run {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Download(stderr.trim().to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_hits_parse_from_flat_playlist_lines() {
        let line = r#"{"title": "Song (Live) - Artist", "url": "https://www.youtube.com/watch?v=abc", "duration": 215.0}"#;
        let hit: SearchHit = serde_json::from_str(line).unwrap();
        assert_eq!(hit.title, "Song (Live) - Artist");
        assert_eq!(hit.url, "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn search_hit_title_may_be_absent() {
        let line = r#"{"url": "https://www.youtube.com/watch?v=abc"}"#;
        let hit: SearchHit = serde_json::from_str(line).unwrap();
        assert_eq!(hit.title, "");
    }
}
