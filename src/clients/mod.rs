/// Data entities for playlists, tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify API client
pub mod spotify;
/// YouTube search and download client backed by yt-dlp
pub mod youtube;

pub use spotify::SpotifyClient;
pub use youtube::YoutubeClient;
