pub mod pages;
mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::PostStore;
use crate::uploads::UploadStore;

/// URL prefix under which uploaded files are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: PostStore,
    pub uploads: UploadStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state for `config` around an already loaded store.
    #[must_use]
    pub fn new(config: Config, store: PostStore) -> Self {
        let uploads = UploadStore::new(&config.upload_dir, UPLOADS_URL_PREFIX);
        Self {
            store,
            uploads,
            config: Arc::new(config),
        }
    }
}

/// Start the web server and run until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails.
pub async fn serve<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", state.config.web_host, state.config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let upload_dir = state.uploads.dir().to_path_buf();
    info!(static_dir = ?static_dir, upload_dir = ?upload_dir, "Serving static files");

    Router::new()
        .merge(routes::router())
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&upload_dir))
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
