use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info};
use rgrabber::clients::{
    entities::Track,
    errors::Result,
    spotify::SpotifyClient,
    youtube::YoutubeClient,
};
use rgrabber::fetch::{self, DownloadOutcome};
use rgrabber::matching::{self, TrackMatch};
use rgrabber::select;

// Configuration for the Session struct
pub struct Config {
    pub spotify: SpotifyClient,
    pub youtube: YoutubeClient,
    pub download_dir: PathBuf,
    pub pacing: Duration,
}

pub struct ConfigBuilder {
    spotify: Option<SpotifyClient>,
    youtube: Option<YoutubeClient>,
    download_dir: Option<PathBuf>,
    pacing: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            spotify: None,
            youtube: None,
            download_dir: None,
            pacing: None, // Default pacing between processed tracks. Default is 1s.
        }
    }

    pub fn build(self) -> Result<Config> {
        let spotify = match self.spotify {
            Some(s) => s,
            None => SpotifyClient::try_default()?,
        };
        let youtube = match self.youtube {
            Some(y) => y,
            None => YoutubeClient::from_env(),
        };
        Ok(Config {
            spotify,
            youtube,
            download_dir: self
                .download_dir
                .unwrap_or_else(|| PathBuf::from("SpotifyDownloads")),
            pacing: self.pacing.unwrap_or(Duration::from_secs(1)),
        })
    }
}

// The main Session struct that runs one interactive download session
pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session { config }
    }

    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        self.run_with_input(&mut input).await
    }

    async fn run_with_input<R: BufRead>(&self, input: &mut R) -> Result<()> {
        info!("Starting download session ...");
        debug!("Fetching playlists from Spotify ...");
        let playlists = self.config.spotify.list_playlists().await?;
        debug!("Fetched {} playlists from Spotify", playlists.len());

        if playlists.is_empty() {
            println!("No playlists found on this account.");
            return Ok(());
        }

        for (idx, playlist) in playlists.iter().enumerate() {
            println!("{}. {} - ID: {}", idx + 1, playlist.name, playlist.id);
        }
        let choice = select::prompt_until_valid(
            input,
            "Choose the playlist you want to select: ",
            |raw| select::parse_choice(raw, playlists.len()),
        )?;
        let playlist = &playlists[choice];
        println!("Selected playlist: {}", playlist.name);

        debug!("Fetching tracks of playlist {} ...", playlist.id);
        let tracks = self
            .config
            .spotify
            .playlist_tracks(playlist.id.clone())
            .await?;
        debug!("Fetched {} tracks from Spotify", tracks.len());

        if tracks.is_empty() {
            println!("The playlist has no tracks.");
            return Ok(());
        }

        for (idx, track) in tracks.iter().enumerate() {
            println!("{}. {} - Artist: {}", idx + 1, track.name, track.artist.name);
        }
        let selection = select::prompt_until_valid(
            input,
            "Enter numbers separated by commas (e.g. 1,2,3) or 'all' to select all: ",
            |raw| select::parse_choices(raw, tracks.len()),
        )?;

        let mut outcomes = Vec::with_capacity(selection.len());
        for idx in selection {
            let outcome = self.process_track(&tracks[idx]).await;
            match &outcome.error {
                None => println!("Download completed: {} by {}", outcome.title, outcome.artist),
                Some(e) => println!(
                    "Skipping {} by {}: {e}",
                    outcome.title, outcome.artist
                ),
            }
            outcomes.push(outcome);
            // Unconditional, applied after failed fetches too, to bound the
            // outbound request rate against the remote services.
            tokio::time::sleep(self.config.pacing).await;
        }

        let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
        info!(
            "Session completed. Processed tracks: {}, failed: {failed}",
            outcomes.len()
        );
        Ok(())
    }

    async fn process_track(&self, track: &Track) -> DownloadOutcome {
        println!("Downloading: {} by {} ...", track.name, track.artist.name);

        let query = matching::search_query(&track.name, &track.artist.name);
        let matched = match self
            .config
            .youtube
            .search(&query, matching::SEARCH_LIMIT)
            .await
        {
            Ok(candidates) => matching::resolve(&track.name, &track.artist.name, &candidates),
            // A failed search is recorded on the track, not retried.
            Err(e) => TrackMatch::NotFound {
                reason: e.to_string(),
            },
        };

        fetch::fetch_track(&matched, track, &self.config.download_dir, |url, path| async move {
            self.config.youtube.download_audio(url, &path).await
        })
        .await
    }
}
