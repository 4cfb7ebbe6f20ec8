mod auth;
mod cache;
mod config;
mod db;
mod errors;
mod fields;
mod jobs;
mod matching;
mod models;
mod resources;
mod routes;
mod skills;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::db::create_pool;
use crate::matching::source::PgCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sikari API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed response cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = ResponseCache::new(redis, config.resource_cache_ttl_secs);
    info!(
        "Redis response cache initialized (ttl {}s)",
        config.resource_cache_ttl_secs
    );

    // Matching collaborators read straight from Postgres
    let catalog = Arc::new(PgCatalog::new(db.clone()));

    let state = AppState {
        db,
        cache,
        config: config.clone(),
        profiles: catalog.clone(),
        candidates: catalog,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
