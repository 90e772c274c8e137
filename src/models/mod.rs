use serde::de::DeserializeOwned;

pub mod album;
pub mod member;
pub mod recommendation;
pub mod song;

pub use album::{Album, NewAlbum};
pub use member::{Member, MemberRow, NewMember};
pub use recommendation::{NewRecommendationLog, RecommendationLogEntry, SongSelection};
pub use song::{NewSong, Song};

/// Decodes a JSON text column, falling back to the type's empty value.
///
/// A bad stored value must never fail the read; it is logged and replaced.
pub(crate) fn decode_json_or_default<T>(row_id: i32, column: &'static str, raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return T::default();
    };

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                row_id,
                column,
                error = %e,
                "Malformed JSON in stored column, using empty default"
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_decode_valid_list() {
        let urls: Vec<String> = decode_json_or_default(1, "image_urls", Some(r#"["a","b"]"#));
        assert_eq!(urls, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_empty_string_falls_back() {
        let urls: Vec<String> = decode_json_or_default(1, "image_urls", Some(""));
        assert!(urls.is_empty());
    }

    #[test]
    fn test_decode_null_column_falls_back() {
        let links: BTreeMap<String, String> = decode_json_or_default(1, "social_media_links", None);
        assert!(links.is_empty());
    }
}
