use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A song in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Song {
    pub id: i32,
    pub title_korean: String,
    pub title_english: Option<String>,
    pub album: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub lyrics_korean: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

/// Song data used when seeding the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub title_korean: String,
    pub title_english: String,
    pub album: String,
    pub release_date: NaiveDate,
    pub lyrics_korean: String,
    pub audio_url: String,
    pub video_url: String,
}
