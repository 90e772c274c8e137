use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::{path::Path, sync::Arc};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    db::CatalogStore,
    middleware::{
        request_id::{make_span_with_request_id, propagate_request_id_layer, set_request_id_layer},
        security_headers::security_headers_middleware,
    },
};

pub mod catalog;
pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    with_middleware(base_routes(state))
}

/// Same as [`create_router`], plus static assets served from `static_dir`
pub fn create_router_with_static(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    with_middleware(base_routes(state).nest_service("/static", ServeDir::new(static_dir)))
}

fn base_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(catalog::members))
        .route("/songs", get(catalog::songs))
        .route("/albums", get(catalog::albums))
        .route(
            "/recommendations",
            get(recommendations::recommend_from_query).post(recommendations::recommend_from_body),
        )
}

fn with_middleware(router: Router) -> Router {
    // Last layer runs first: the request id must exist before the trace span is built
    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(set_request_id_layer())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockCatalogStore, error::AppError, models::Song};
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;

    fn spring_day() -> Song {
        Song {
            id: 4,
            title_korean: "봄날".to_string(),
            title_english: Some("Spring Day".to_string()),
            album: Some("You Never Walk Alone".to_string()),
            release_date: chrono::NaiveDate::from_ymd_opt(2017, 2, 13),
            lyrics_korean: None,
            audio_url: None,
            video_url: None,
        }
    }

    fn test_server(store: MockCatalogStore) -> TestServer {
        TestServer::new(create_router(AppState::new(Arc::new(store)))).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_store_returns_service_unavailable() {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_members()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = test_server(store).get("/api/members").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.header("x-frame-options"), "DENY");
        response.assert_json(&json!({ "error": "Database connection failed" }));
    }

    #[tokio::test]
    async fn test_failed_audit_insert_still_succeeds() {
        let mut store = MockCatalogStore::new();
        store.expect_name().return_const("mock");
        store
            .expect_find_songs()
            .returning(|_| Ok(vec![spring_day()]));
        store
            .expect_insert_recommendation()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let response = test_server(store)
            .get("/api/recommendations")
            .add_query_param("preferences", "ballad")
            .await;

        response.assert_status_ok();
        let songs: Vec<Value> = response.json();
        assert_eq!(songs[0]["title_english"], "Spring Day");
    }

    #[tokio::test]
    async fn test_generated_request_id_is_a_uuid() {
        let response = test_server(MockCatalogStore::new()).get("/health").await;

        let request_id = response.header("x-request-id");
        let request_id = request_id.to_str().unwrap();
        assert_eq!(request_id.len(), 36, "x-request-id should be a UUID string");
        assert_eq!(request_id.matches('-').count(), 4);
    }

    #[tokio::test]
    async fn test_caller_request_id_is_kept_on_error_responses() {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_albums()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let response = test_server(store)
            .get("/api/albums")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("gateway-7f3a"),
            )
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.header("x-request-id"), "gateway-7f3a");
    }
}
