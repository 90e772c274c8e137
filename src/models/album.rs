use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An album in the discography
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Album {
    pub id: i32,
    pub title_korean: String,
    pub title_english: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub description_korean: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub title_korean: String,
    pub title_english: String,
    pub release_date: NaiveDate,
    pub description_korean: String,
    pub cover_image_url: String,
}
