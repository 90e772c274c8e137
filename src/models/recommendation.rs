use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which songs a preference string resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongSelection {
    /// Songs whose English title is one of these, newest first
    Titles(&'static [&'static str]),
    /// The `n` most recently released songs
    Latest(i64),
}

/// Audit row for a recommendation request. Written, never read back by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct RecommendationLogEntry {
    pub id: i32,
    pub user_preferences: String,
    pub recommended_songs: Vec<String>,
    pub recommendation_reason: String,
    pub created_at: DateTime<Utc>,
}

/// Audit data before the store assigns an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendationLog {
    pub user_preferences: String,
    /// Korean titles, in the order they were recommended
    pub recommended_songs: Vec<String>,
    pub recommendation_reason: String,
}
