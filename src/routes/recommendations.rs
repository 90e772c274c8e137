use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::request_id::RequestId;

use crate::{
    error::AppResult,
    middleware::request_id::request_id_str,
    models::Song,
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Handler for `GET /api/recommendations?preferences=...`
pub async fn recommend_from_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Song>>> {
    let preferences = query
        .ok()
        .and_then(|Query(q)| q.preferences)
        .unwrap_or_default();

    respond(state, request_id_str(&request_id), preferences).await
}

/// Handler for `POST /api/recommendations` with `{"preferences": "..."}`
pub async fn recommend_from_body(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Vec<Song>>> {
    let preferences = match body {
        Ok(Json(value)) => preferences_from_body(&value),
        Err(rejection) => {
            tracing::debug!(
                request_id = %request_id_str(&request_id),
                rejection = %rejection,
                "Unreadable recommendation body, using empty preferences"
            );
            String::new()
        }
    };

    respond(state, request_id_str(&request_id), preferences).await
}

/// Pulls `preferences` out of a JSON body. Anything other than a string is treated as empty.
pub fn preferences_from_body(body: &Value) -> String {
    body.get("preferences")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn respond(
    state: AppState,
    request_id: &str,
    preferences: String,
) -> AppResult<Json<Vec<Song>>> {
    tracing::info!(
        request_id = %request_id,
        preferences = %preferences,
        "Processing recommendation request"
    );

    let result = recommendations::recommend(state.store.as_ref(), &preferences).await?;

    tracing::info!(
        request_id = %request_id,
        song_count = result.songs.len(),
        logged = result.logged,
        "Recommendation completed"
    );

    Ok(Json(result.songs))
}
