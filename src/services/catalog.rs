use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Album, Member, Song},
};

/// Members by id ascending
pub async fn list_members(store: &dyn CatalogStore) -> AppResult<Vec<Member>> {
    store.list_members().await
}

/// Songs by release date, newest first
pub async fn list_songs(store: &dyn CatalogStore) -> AppResult<Vec<Song>> {
    store.list_songs().await
}

/// Albums by release date, newest first
pub async fn list_albums(store: &dyn CatalogStore) -> AppResult<Vec<Album>> {
    store.list_albums().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_catalog, MemoryStore, MockCatalogStore};
    use crate::error::AppError;

    #[tokio::test]
    async fn test_members_in_seed_order() {
        let store = MemoryStore::new();
        seed_catalog(&store).await.unwrap();

        let members = list_members(&store).await.unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name_english.as_str()).collect();

        assert_eq!(names, vec!["RM", "Jin", "Suga", "J-Hope", "Jimin", "V", "Jungkook"]);
        assert!(members.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_albums_newest_first() {
        let store = MemoryStore::new();
        seed_catalog(&store).await.unwrap();

        let albums = list_albums(&store).await.unwrap();

        assert_eq!(albums.len(), 4);
        assert!(albums
            .windows(2)
            .all(|w| w[0].release_date >= w[1].release_date));
        assert_eq!(albums[0].title_english.as_deref(), Some("Butter"));
    }

    #[tokio::test]
    async fn test_songs_newest_first() {
        let store = MemoryStore::new();
        seed_catalog(&store).await.unwrap();

        let songs = list_songs(&store).await.unwrap();
        assert_eq!(songs.first().and_then(|s| s.title_english.as_deref()), Some("Permission to Dance"));
        assert_eq!(songs.last().and_then(|s| s.title_english.as_deref()), Some("Spring Day"));
    }

    #[tokio::test]
    async fn test_unavailable_store_is_reported() {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_songs()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let err = list_songs(&store).await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
