use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppResult;

use super::decode_json_or_default;

/// A band member as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: i32,
    pub name_korean: String,
    pub name_english: String,
    pub position: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub description_korean: Option<String>,
    /// Gallery images, in display order
    pub image_urls: Vec<String>,
    /// Platform name (e.g. "twitter") to handle or URL
    pub social_media_links: BTreeMap<String, String>,
}

/// Raw `bts_members` row; the structured fields are still JSON text here
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRow {
    pub id: i32,
    pub name_korean: String,
    pub name_english: String,
    pub position: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub description_korean: Option<String>,
    pub image_urls: Option<String>,
    pub social_media_links: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        let image_urls = decode_json_or_default(row.id, "image_urls", row.image_urls.as_deref());
        let social_media_links = decode_json_or_default(
            row.id,
            "social_media_links",
            row.social_media_links.as_deref(),
        );

        Self {
            id: row.id,
            name_korean: row.name_korean,
            name_english: row.name_english,
            position: row.position,
            birth_date: row.birth_date,
            description_korean: row.description_korean,
            image_urls,
            social_media_links,
        }
    }
}

/// Member data used when seeding the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name_korean: String,
    pub name_english: String,
    pub position: String,
    pub birth_date: NaiveDate,
    pub description_korean: String,
    pub image_urls: Vec<String>,
    pub social_media_links: BTreeMap<String, String>,
}

impl NewMember {
    /// JSON text stored in the `image_urls` column
    pub fn image_urls_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.image_urls)?)
    }

    /// JSON text stored in the `social_media_links` column
    pub fn social_media_links_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.social_media_links)?)
    }
}
