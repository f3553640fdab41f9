use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::storage::SqliteStore;

pub mod routes;

/// Server state.
///
/// The one store handle for the server's lifetime. `rusqlite::Connection` is
/// not `Sync`, so requests take turns on it.
pub struct AppState {
    pub store: Mutex<SqliteStore>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self { store: Mutex::new(store) }
    }
}

/// API routes, with static files from `ui_dir` as the fallback
pub fn router(state: Arc<AppState>, ui_dir: &Path) -> Router {
    Router::new()
        .route("/api/dashboard", get(routes::get_dashboard))
        .route("/api/options", get(routes::get_options))
        .route("/api/listings", get(routes::get_listings))
        .route("/api/choices", get(routes::get_choices))
        .route("/api/claims", post(routes::post_claim))
        .route("/api/providers", post(routes::post_provider))
        .route("/api/analysis", get(routes::list_analyses))
        .route("/api/analysis/{name}", get(routes::get_analysis))
        .route("/api/tables/{name}", get(routes::get_table))
        .fallback_service(ServeDir::new(ui_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: SqliteStore, ui_dir: PathBuf) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(store));
    let app = router(state, &ui_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
