use std::future::Future;
use std::path::{Path, PathBuf};

use log::debug;

use crate::clients::entities::Track;
use crate::clients::errors::Result;
use crate::matching::TrackMatch;

/// Result of processing one selected track, kept for reporting only.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub title: String,
    pub artist: String,
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Output file for a track inside the destination directory.
///
/// Derived from title and artist only. The name is not sanitized against
/// characters a file system may reject, and two tracks with the same title
/// and artist collide — a known limitation.
pub fn output_path(dest_dir: &Path, title: &str, artist: &str) -> PathBuf {
    dest_dir.join(format!("{title} - {artist}.mp3"))
}

/// Run the download step for one matched track.
///
/// A track without a match is reported as failed right away; `download` is
/// never invoked for it. Otherwise the destination directory is created when
/// absent and `download` is called with the matched url and the derived
/// output path. Every failure is captured in the outcome, never propagated,
/// so the remaining tracks of a selection are always processed.
pub async fn fetch_track<'a, Fut, F>(
    matched: &'a TrackMatch,
    track: &Track,
    dest_dir: &Path,
    download: F,
) -> DownloadOutcome
where
    F: FnOnce(&'a str, PathBuf) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let outcome = |error: Option<String>| DownloadOutcome {
        title: track.name.clone(),
        artist: track.artist.name.clone(),
        error,
    };

    let url = match matched {
        TrackMatch::Found { url } => url.as_str(),
        TrackMatch::NotFound { reason } => return outcome(Some(reason.clone())),
    };

    if let Err(e) = tokio::fs::create_dir_all(dest_dir).await {
        return outcome(Some(format!(
            "could not create {}: {e}",
            dest_dir.display()
        )));
    }

    let path = output_path(dest_dir, &track.name, &track.artist.name);
    debug!("Downloading {url} to {}", path.display());
    match download(url, path).await {
        Ok(()) => outcome(None),
        Err(e) => outcome(Some(e.to_string())),
    }
}
