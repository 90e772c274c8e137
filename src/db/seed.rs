//! Fixed reference data for the catalog tables.
//!
//! Each table is gated on its row count: rows are inserted only when the
//! table is empty, so running this on every start never duplicates data.
//! The gate is by count, not by key, so a table that somehow ends up with
//! partial data is left as is. The store checks and inserts atomically, so
//! two processes starting together still produce a single copy.

use chrono::NaiveDate;
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{NewAlbum, NewMember, NewSong},
};

use super::{CatalogSeed, CatalogStore, CatalogTable};

/// Which tables were populated by a seeding run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub tables_seeded: Vec<CatalogTable>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.tables_seeded.is_empty()
    }
}

/// Create the schema and seed it. Must finish before the server starts taking requests.
pub async fn initialize(store: &dyn CatalogStore) -> AppResult<SeedReport> {
    store.ensure_schema().await?;
    seed_catalog(store).await
}

/// Keep retrying [`initialize`] until it succeeds.
///
/// Used when the database is down at startup: the server is already
/// listening and answering 503, and the schema appears once this returns.
pub async fn initialize_until_ready(store: Arc<dyn CatalogStore>, retry_every: Duration) -> SeedReport {
    let mut attempt: u32 = 1;
    loop {
        match initialize(store.as_ref()).await {
            Ok(report) => {
                info!(store = store.name(), attempt, seeded = ?report.tables_seeded, "Database initialized");
                return report;
            }
            Err(e) => {
                warn!(
                    store = store.name(),
                    attempt,
                    error = %e,
                    retry_in_ms = retry_every.as_millis() as u64,
                    "Database initialization failed, retrying"
                );
            }
        }
        tokio::time::sleep(retry_every).await;
        attempt = attempt.saturating_add(1);
    }
}

/// Seed every empty catalog table with its reference rows
pub async fn seed_catalog(store: &dyn CatalogStore) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for seed in [
        CatalogSeed::Members(members()?),
        CatalogSeed::Songs(songs()?),
        CatalogSeed::Albums(albums()?),
    ] {
        if store.seed_table(&seed).await? {
            info!(table = %seed.table(), rows = seed.len(), "Seeded table");
            report.tables_seeded.push(seed.table());
        }
    }

    if report.is_empty() {
        info!(store = store.name(), "Catalog already seeded");
    }

    Ok(report)
}

fn date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::Internal(format!("Invalid seed date {}: {}", value, e)))
}

fn official_socials() -> BTreeMap<String, String> {
    [
        ("twitter", "@BTS_twt"),
        ("instagram", "@bts.bighitofficial"),
        ("weverse", "BTS Official"),
    ]
    .into_iter()
    .map(|(platform, handle)| (platform.to_string(), handle.to_string()))
    .collect()
}

fn gallery(slug: &str) -> Vec<String> {
    (1..=3)
        .map(|n| format!("/static/images/{}_{}.jpg", slug, n))
        .collect()
}

/// The seven members, in id order
pub fn members() -> AppResult<Vec<NewMember>> {
    let rows = [
        ("김남준", "RM", "리더, 래퍼", "1994-09-12", "BTS의 리더이자 메인 래퍼입니다.", "rm"),
        ("김석진", "Jin", "보컬, 비주얼", "1992-12-04", "BTS의 보컬이자 비주얼을 담당합니다.", "jin"),
        ("민윤기", "Suga", "래퍼, 프로듀서", "1993-03-09", "BTS의 래퍼이자 프로듀서입니다.", "suga"),
        ("정호석", "J-Hope", "래퍼, 댄서", "1994-02-18", "BTS의 래퍼이자 메인 댄서입니다.", "jhope"),
        ("박지민", "Jimin", "보컬, 댄서", "1995-10-13", "BTS의 보컬이자 리드 댄서입니다.", "jimin"),
        ("김태형", "V", "보컬, 비주얼", "1995-12-30", "BTS의 보컬이자 비주얼을 담당합니다.", "v"),
        ("전정국", "Jungkook", "메인 보컬, 센터", "1997-09-01", "BTS의 메인 보컬이자 센터입니다.", "jungkook"),
    ];

    rows.into_iter()
        .map(|(korean, english, position, birth, description, slug)| -> AppResult<NewMember> {
            Ok(NewMember {
                name_korean: korean.to_string(),
                name_english: english.to_string(),
                position: position.to_string(),
                birth_date: date(birth)?,
                description_korean: description.to_string(),
                image_urls: gallery(slug),
                social_media_links: official_socials(),
            })
        })
        .collect()
}

pub fn songs() -> AppResult<Vec<NewSong>> {
    let rows = [
        (
            "다이너마이트",
            "Dynamite",
            "BE",
            "2020-08-21",
            "코스 아이 아이 아이 샤인 스루 더 시티...",
            "/static/audio/dynamite.mp3",
            "https://www.youtube.com/watch?v=gdZLi9oWNZg",
        ),
        (
            "버터",
            "Butter",
            "Butter",
            "2021-05-21",
            "스무스 라이크 버터...",
            "/static/audio/butter.mp3",
            "https://www.youtube.com/watch?v=WMweEpGlu_U",
        ),
        (
            "퍼미션 투 댄스",
            "Permission to Dance",
            "Butter",
            "2021-07-09",
            "잇츠 더 사우트 오브 뮤직...",
            "/static/audio/permission_to_dance.mp3",
            "https://www.youtube.com/watch?v=CuklIb9d3fI",
        ),
        (
            "봄날",
            "Spring Day",
            "You Never Walk Alone",
            "2017-02-13",
            "보고 싶다 이렇게 말하니까 더 보고 싶다...",
            "/static/audio/spring_day.mp3",
            "https://www.youtube.com/watch?v=xEeFrLSkMm8",
        ),
    ];

    rows.into_iter()
        .map(|(korean, english, album, released, lyrics, audio, video)| -> AppResult<NewSong> {
            Ok(NewSong {
                title_korean: korean.to_string(),
                title_english: english.to_string(),
                album: album.to_string(),
                release_date: date(released)?,
                lyrics_korean: lyrics.to_string(),
                audio_url: audio.to_string(),
                video_url: video.to_string(),
            })
        })
        .collect()
}

pub fn albums() -> AppResult<Vec<NewAlbum>> {
    let rows = [
        (
            "버터",
            "Butter",
            "2021-07-09",
            "버터와 퍼미션 투 댄스를 담은 싱글 앨범입니다.",
            "/static/images/album_butter.jpg",
        ),
        (
            "BE",
            "BE",
            "2020-11-20",
            "다이너마이트가 수록된 위로와 희망의 앨범입니다.",
            "/static/images/album_be.jpg",
        ),
        (
            "맵 오브 더 소울 : 7",
            "Map of the Soul: 7",
            "2020-02-21",
            "데뷔 7년의 이야기를 담은 정규 4집입니다.",
            "/static/images/album_mots7.jpg",
        ),
        (
            "유 네버 워크 얼론",
            "You Never Walk Alone",
            "2017-02-13",
            "봄날이 수록된 윙즈 외전 앨범입니다.",
            "/static/images/album_ynwa.jpg",
        ),
    ];

    rows.into_iter()
        .map(|(korean, english, released, description, cover)| -> AppResult<NewAlbum> {
            Ok(NewAlbum {
                title_korean: korean.to_string(),
                title_english: english.to_string(),
                release_date: date(released)?,
                description_korean: description.to_string(),
                cover_image_url: cover.to_string(),
            })
        })
        .collect()
}
