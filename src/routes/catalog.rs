use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{Album, Member, Song},
    routes::AppState,
    services::catalog,
};

/// Handler for the members listing
pub async fn members(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = catalog::list_members(state.store.as_ref()).await?;
    Ok(Json(members))
}

/// Handler for the songs listing
pub async fn songs(State(state): State<AppState>) -> AppResult<Json<Vec<Song>>> {
    let songs = catalog::list_songs(state.store.as_ref()).await?;
    Ok(Json(songs))
}

/// Handler for the albums listing
pub async fn albums(State(state): State<AppState>) -> AppResult<Json<Vec<Album>>> {
    let albums = catalog::list_albums(state.store.as_ref()).await?;
    Ok(Json(albums))
}
