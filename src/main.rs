use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bts_fan_api::{
    config::Config,
    db::{self, CatalogStore, MemoryStore, PgStore},
    routes::{create_router_with_static, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bts_fan_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn CatalogStore> = if config.uses_memory_store() {
        Arc::new(MemoryStore::new())
    } else {
        let pool = db::create_pool(&config.database_url, config.db_max_connections)?;
        Arc::new(PgStore::new(pool))
    };

    // Seeding finishes before the listener opens, so no request sees a half-filled catalog
    match db::initialize(store.as_ref()).await {
        Ok(report) => tracing::info!(
            store = store.name(),
            seeded = ?report.tables_seeded,
            "Database initialized"
        ),
        Err(e) => {
            tracing::error!(
                store = store.name(),
                error = %e,
                "Database initialization failed, serving without it until it succeeds"
            );
            tokio::spawn(db::initialize_until_ready(
                Arc::clone(&store),
                config.db_init_retry_interval(),
            ));
        }
    }

    let app = create_router_with_static(AppState::new(store), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
