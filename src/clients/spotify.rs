use std::path::PathBuf;

use log::debug;

use crate::clients::{
    entities::{Artist, Playlist, Track},
    errors::{Error, Result},
};
use crate::paging::{self, Listing};
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{Page, PlayableItem, PlaylistId, PlaylistItem, SimplifiedPlaylist},
    prelude::*,
    scopes,
};

/// Items requested per listing page.
const PAGE_SIZE: u32 = 50;

impl From<SimplifiedPlaylist> for Playlist {
    fn from(f: SimplifiedPlaylist) -> Playlist {
        Playlist {
            id: f.id,
            name: f.name,
        }
    }
}

/// Playlist entries that are not music tracks (podcast episodes, local files
/// without artist data) are dropped during accumulation, before numbering.
fn item_to_track(item: PlaylistItem) -> Option<Track> {
    let Some(PlayableItem::Track(track)) = item.track else {
        debug!("Skipping playlist item that is not a track");
        return None;
    };
    let Some(artist) = track.artists.first() else {
        debug!("Skipping track '{}' without artist data", track.name);
        return None;
    };
    Some(Track {
        name: track.name.clone(),
        artist: Artist {
            name: artist.name.clone(),
        },
    })
}

fn page_to_listing<A: serde::de::DeserializeOwned, T>(
    page: Page<A>,
    map: impl FnMut(A) -> Option<T>,
) -> Listing<T> {
    let next = page.next.is_some().then(|| page.offset + page.limit);
    Listing {
        items: page.items.into_iter().filter_map(map).collect(),
        next,
    }
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Authorize the Spotify client via CLI prompt and OAuth flow
    // This function requires the `cli` feature enabled.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        // This function requires the `cli` feature enabled.
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    // Fetch every playlist of the account, page by page
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        paging::collect_pages(|offset| self.playlist_page(offset.unwrap_or(0))).await
    }

    async fn playlist_page(&self, offset: u32) -> Result<Listing<Playlist>> {
        debug!("Fetching playlist page at offset {offset}");
        let page = self
            .spotify
            .current_user_playlists_manual(Some(PAGE_SIZE), Some(offset))
            .await?;
        Ok(page_to_listing(page, |p| Some(Playlist::from(p))))
    }

    // Fetch every track of a playlist, page by page
    pub async fn playlist_tracks(&self, playlist_id: PlaylistId<'_>) -> Result<Vec<Track>> {
        paging::collect_pages(|offset| self.track_page(&playlist_id, offset.unwrap_or(0))).await
    }

    async fn track_page(
        &self,
        playlist_id: &PlaylistId<'_>,
        offset: u32,
    ) -> Result<Listing<Track>> {
        debug!("Fetching track page of {playlist_id} at offset {offset}");
        let page = self
            .spotify
            .playlist_items_manual(playlist_id.clone(), None, None, Some(PAGE_SIZE), Some(offset))
            .await?;
        Ok(page_to_listing(page, item_to_track))
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let creds = Credentials::from_env()
        .ok_or_else(|| Error::Configuration("Missing Spotify credentials in environment variables. Check README.MD for details.".into()))?;
        let oauth = OAuth::from_env(scopes!("user-library-read", "playlist-read-private"))
        .ok_or_else(|| Error::Configuration("Missing Spotify OAuth configuration in environment variables. Check README.MD for details.".into()))?;

        // Set up token caching in a default cache directory
        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".rgrabber_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path,
                ..Default::default()
            },
        );

        Ok(Self { spotify })
    }
}
