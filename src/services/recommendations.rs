use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{NewRecommendationLog, Song, SongSelection},
};

/// How many songs the fallback rule returns
pub const DEFAULT_RECOMMENDATION_COUNT: i64 = 3;

/// Reason recorded when no preference text was given
pub const POPULAR_SONGS_REASON: &str = "Popular BTS songs";

/// A keyword rule: any keyword present in the lowercased text selects the titles
struct KeywordRule {
    keywords: &'static [&'static str],
    titles: &'static [&'static str],
}

/// Checked in order; the first rule with a matching keyword wins
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["upbeat", "dance"],
        titles: &["Dynamite", "Butter", "Permission to Dance"],
    },
    KeywordRule {
        keywords: &["emotional", "ballad"],
        titles: &["Spring Day"],
    },
];

/// Maps free-text preferences to a song selection.
///
/// Plain case-insensitive substring containment, no tokenizing or scoring.
/// Text that matches no rule (including the empty string) falls back to the
/// most recent releases.
pub fn match_preferences(preferences: &str) -> SongSelection {
    let text = preferences.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|rule| SongSelection::Titles(rule.titles))
        .unwrap_or(SongSelection::Latest(DEFAULT_RECOMMENDATION_COUNT))
}

/// Human-readable reason stored alongside a recommendation
pub fn recommendation_reason(preferences: &str) -> String {
    if preferences.is_empty() {
        POPULAR_SONGS_REASON.to_string()
    } else {
        format!("Based on preferences: {}", preferences)
    }
}

/// Builds the audit row for a finished recommendation
pub fn build_log_entry(preferences: &str, songs: &[Song]) -> NewRecommendationLog {
    NewRecommendationLog {
        user_preferences: preferences.to_string(),
        recommended_songs: songs.iter().map(|song| song.title_korean.clone()).collect(),
        recommendation_reason: recommendation_reason(preferences),
    }
}

/// Outcome of a recommendation request
#[derive(Debug)]
pub struct Recommendation {
    pub songs: Vec<Song>,
    /// Whether the audit row made it to storage
    pub logged: bool,
}

/// Resolves preferences to songs and appends an audit row.
///
/// Only the song lookup can fail the call. A failed audit insert is logged
/// and swallowed, the songs are still returned.
pub async fn recommend(
    store: &dyn CatalogStore,
    preferences: &str,
) -> AppResult<Recommendation> {
    let selection = match_preferences(preferences);
    let songs = store.find_songs(selection).await?;

    tracing::debug!(
        ?selection,
        song_count = songs.len(),
        "Resolved recommendation"
    );

    let entry = build_log_entry(preferences, &songs);
    let logged = match store.insert_recommendation(&entry).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                error = %e,
                store = store.name(),
                "Failed to record recommendation, returning result anyway"
            );
            false
        }
    };

    Ok(Recommendation { songs, logged })
}
