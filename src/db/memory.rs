use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{
        Album, Member, MemberRow, NewRecommendationLog, RecommendationLogEntry, Song,
        SongSelection,
    },
};

use super::{CatalogSeed, CatalogStore, CatalogTable};

/// In-process store with the same ordering rules as the PostgreSQL one.
///
/// Member rows keep their structured fields as JSON text, exactly like the
/// database columns, so decoding goes through the same path.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    members: Vec<MemberRow>,
    songs: Vec<Song>,
    albums: Vec<Album>,
    recommendations: Vec<RecommendationLogEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, MemoryStoreInner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    /// Snapshot of the audit log, oldest first
    pub fn recommendation_log(&self) -> Vec<RecommendationLogEntry> {
        self.lock()
            .map(|inner| inner.recommendations.clone())
            .unwrap_or_default()
    }
}

impl MemoryStoreInner {
    fn row_count(&self, table: CatalogTable) -> usize {
        match table {
            CatalogTable::Members => self.members.len(),
            CatalogTable::Songs => self.songs.len(),
            CatalogTable::Albums => self.albums.len(),
        }
    }
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

/// Newest release first, undated last, then insertion order
fn sort_by_release<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (Option<chrono::NaiveDate>, i32),
{
    items.sort_by_key(|item| {
        let (release_date, id) = key(item);
        (release_date.is_none(), Reverse(release_date), id)
    });
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn ensure_schema(&self) -> AppResult<()> {
        Ok(())
    }

    async fn count_rows(&self, table: CatalogTable) -> AppResult<i64> {
        Ok(self.lock()?.row_count(table) as i64)
    }

    async fn seed_table(&self, seed: &CatalogSeed) -> AppResult<bool> {
        // Encode before locking so a failure leaves the table untouched
        let member_rows = match seed {
            CatalogSeed::Members(members) => members
                .iter()
                .map(|m| -> AppResult<_> {
                    Ok((m, m.image_urls_json()?, m.social_media_links_json()?))
                })
                .collect::<AppResult<Vec<_>>>()?,
            _ => Vec::new(),
        };

        // Check and insert under one guard
        let mut inner = self.lock()?;
        if inner.row_count(seed.table()) > 0 {
            return Ok(false);
        }

        match seed {
            CatalogSeed::Members(_) => {
                for (member, image_urls, social_media_links) in member_rows {
                    let id = next_id(inner.members.len());
                    inner.members.push(MemberRow {
                        id,
                        name_korean: member.name_korean.clone(),
                        name_english: member.name_english.clone(),
                        position: Some(member.position.clone()),
                        birth_date: Some(member.birth_date),
                        description_korean: Some(member.description_korean.clone()),
                        image_urls: Some(image_urls),
                        social_media_links: Some(social_media_links),
                    });
                }
            }
            CatalogSeed::Songs(songs) => {
                for song in songs {
                    let id = next_id(inner.songs.len());
                    inner.songs.push(Song {
                        id,
                        title_korean: song.title_korean.clone(),
                        title_english: Some(song.title_english.clone()),
                        album: Some(song.album.clone()),
                        release_date: Some(song.release_date),
                        lyrics_korean: Some(song.lyrics_korean.clone()),
                        audio_url: Some(song.audio_url.clone()),
                        video_url: Some(song.video_url.clone()),
                    });
                }
            }
            CatalogSeed::Albums(albums) => {
                for album in albums {
                    let id = next_id(inner.albums.len());
                    inner.albums.push(Album {
                        id,
                        title_korean: album.title_korean.clone(),
                        title_english: Some(album.title_english.clone()),
                        release_date: Some(album.release_date),
                        description_korean: Some(album.description_korean.clone()),
                        cover_image_url: Some(album.cover_image_url.clone()),
                    });
                }
            }
        }

        Ok(true)
    }

    async fn list_members(&self) -> AppResult<Vec<Member>> {
        let inner = self.lock()?;
        let mut rows = inner.members.clone();
        rows.sort_by_key(|row| row.id);
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn list_songs(&self) -> AppResult<Vec<Song>> {
        let mut songs = self.lock()?.songs.clone();
        sort_by_release(&mut songs, |s| (s.release_date, s.id));
        Ok(songs)
    }

    async fn list_albums(&self) -> AppResult<Vec<Album>> {
        let mut albums = self.lock()?.albums.clone();
        sort_by_release(&mut albums, |a| (a.release_date, a.id));
        Ok(albums)
    }

    async fn find_songs(&self, selection: SongSelection) -> AppResult<Vec<Song>> {
        let songs = self.list_songs().await?;

        let selected = match selection {
            SongSelection::Titles(titles) => songs
                .into_iter()
                .filter(|song| {
                    song.title_english
                        .as_deref()
                        .is_some_and(|title| titles.iter().any(|t| *t == title))
                })
                .collect(),
            SongSelection::Latest(limit) => songs
                .into_iter()
                .take(usize::try_from(limit).unwrap_or(0))
                .collect(),
        };

        Ok(selected)
    }

    async fn insert_recommendation(&self, entry: &NewRecommendationLog) -> AppResult<()> {
        let mut inner = self.lock()?;

        // Timestamps never go backwards, even if the wall clock does
        let now = Utc::now();
        let created_at = inner
            .recommendations
            .last()
            .map(|last| last.created_at.max(now))
            .unwrap_or(now);

        let id = next_id(inner.recommendations.len());
        inner.recommendations.push(RecommendationLogEntry {
            id,
            user_preferences: entry.user_preferences.clone(),
            recommended_songs: entry.recommended_songs.clone(),
            recommendation_reason: entry.recommendation_reason.clone(),
            created_at,
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
