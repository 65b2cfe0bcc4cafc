use rspotify::model::PlaylistId;

#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub artist: Artist, // first listed artist only
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: PlaylistId<'static>,
    pub name: String,
}
