//! Rgrabber - Download tracks from Spotify playlists as local audio files
//!
//! This library provides functionality to list the playlists of a Spotify
//! account, pick tracks out of one of them, locate a matching YouTube video
//! per track and save its audio locally through yt-dlp.

/// Client modules for interacting with external services
pub mod clients;
/// Per-track download execution and outcome reporting
pub mod fetch;
/// Search query composition and candidate selection
pub mod matching;
/// Accumulation of paginated remote listings
pub mod paging;
/// Parsing and validation of interactive selections
pub mod select;
