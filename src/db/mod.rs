//! Storage abstraction for the catalog and the recommendation audit log
//!
//! The production implementation is backed by PostgreSQL; an in-process
//! implementation serves local runs and tests. Handlers never see which one
//! they are talking to.

use std::fmt::Display;

use crate::{
    error::AppResult,
    models::{Album, Member, NewAlbum, NewMember, NewRecommendationLog, NewSong, Song, SongSelection},
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::{create_pool, PgStore};
pub use seed::{initialize, initialize_until_ready, seed_catalog, SeedReport};

/// The three seeded catalog tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    Members,
    Songs,
    Albums,
}

impl CatalogTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            CatalogTable::Members => "bts_members",
            CatalogTable::Songs => "songs",
            CatalogTable::Albums => "albums",
        }
    }
}

/// Reference rows for one catalog table
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSeed {
    Members(Vec<NewMember>),
    Songs(Vec<NewSong>),
    Albums(Vec<NewAlbum>),
}

impl CatalogSeed {
    pub fn table(&self) -> CatalogTable {
        match self {
            CatalogSeed::Members(_) => CatalogTable::Members,
            CatalogSeed::Songs(_) => CatalogTable::Songs,
            CatalogSeed::Albums(_) => CatalogTable::Albums,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CatalogSeed::Members(rows) => rows.len(),
            CatalogSeed::Songs(rows) => rows.len(),
            CatalogSeed::Albums(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for CatalogTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Create the four tables if they do not exist yet
    async fn ensure_schema(&self) -> AppResult<()>;

    async fn count_rows(&self, table: CatalogTable) -> AppResult<i64>;

    /// Insert the rows, in order, only if the table is empty.
    ///
    /// The emptiness check and the inserts are one atomic step: concurrent
    /// callers cannot both see an empty table. All rows land or none do.
    /// Returns whether the rows were inserted.
    async fn seed_table(&self, seed: &CatalogSeed) -> AppResult<bool>;

    /// All members, by id ascending
    async fn list_members(&self) -> AppResult<Vec<Member>>;

    /// All songs, newest release first
    async fn list_songs(&self) -> AppResult<Vec<Song>>;

    /// All albums, newest release first
    async fn list_albums(&self) -> AppResult<Vec<Album>>;

    /// Songs matching a selection, newest release first, ties by id
    async fn find_songs(&self, selection: SongSelection) -> AppResult<Vec<Song>>;

    /// Append one audit row; the store assigns id and timestamp
    async fn insert_recommendation(&self, entry: &NewRecommendationLog) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
