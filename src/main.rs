//! Revision Board Backend
//!
//! A small shared board of revision proposals plus a visit log, persisted as a
//! single JSON document that is re-read on every request.

mod api;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat, StorageBackend};
use store::{JsonFileStore, MemoryStore, Repository, Store};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    init_tracing(&config);

    tracing::info!("Starting Revision Board");
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::File => {
            let store = JsonFileStore::open(&config.data_file).await;
            tracing::info!("Data file: {:?}", store.path());
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; the board is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    let repo = Arc::new(Repository::new(store));

    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "Server started: http://localhost:{}",
        config.bind_addr.port()
    );
    tracing::info!("Everyone who opens the page shares the same board and visit log");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Revisions
        .route("/revisions", get(api::list_revisions))
        .route("/revisions", post(api::create_revision))
        .route("/revisions/{id}", put(api::update_revision))
        .route("/revisions/{id}", delete(api::delete_revision))
        // Access history
        .route("/access-history", get(api::list_visits))
        .route("/access-history", post(api::record_visit))
        .route("/access-history", delete(api::clear_visits));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
