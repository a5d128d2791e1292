//! HTTP API layer.
//!
//! This module contains thin handlers that delegate to the catalog and
//! services. It provides the router construction and server startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::artwork::ArtworkProvider;
use crate::catalog::StationStore;
use crate::services::NowPlayingService;
use crate::stream::MetadataSource;

pub mod http;

/// Errors that can occur when starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind or serve on the TCP port.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The server loop stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Shared application state for the API layer.
///
/// This is a thin wrapper that holds references to services.
/// All business logic lives in the services themselves.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog.
    pub catalog: Arc<dyn StationStore>,
    /// ICY metadata probe.
    pub metadata: Arc<dyn MetadataSource>,
    /// Artwork search.
    pub artwork: Arc<dyn ArtworkProvider>,
    /// Metadata + artwork composition.
    pub now_playing: NowPlayingService,
    /// Origins allowed by CORS (empty = any).
    pub trusted_origins: Arc<Vec<String>>,
}

impl AppState {
    /// Wires the state from its parts.
    pub fn new(
        catalog: Arc<dyn StationStore>,
        metadata: Arc<dyn MetadataSource>,
        artwork: Arc<dyn ArtworkProvider>,
        trusted_origins: Vec<String>,
    ) -> Self {
        let now_playing = NowPlayingService::new(Arc::clone(&metadata), Arc::clone(&artwork));
        Self {
            catalog,
            metadata,
            artwork,
            now_playing,
            trusted_origins: Arc::new(trusted_origins),
        }
    }
}

/// Builds the CORS layer for the configured origins.
fn cors_layer(trusted_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if trusted_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let trusted = trusted_origins.to_vec();
    cors.allow_origin(AllowOrigin::predicate(
        move |origin: &HeaderValue, _| {
            let origin_str = origin.to_str().unwrap_or("");
            trusted.iter().any(|allowed| origin_str.starts_with(allowed))
        },
    ))
}

/// Starts the HTTP server on `addr` and serves until the task is dropped.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    log::info!("[Server] Listening on http://{}", addr);
    log::info!("[Server] CORS trusted origins: {:?}", state.trusted_origins);

    let cors = cors_layer(&state.trusted_origins);
    let app = http::create_router(state).layer(cors);

    axum::serve(listener, app).await?;
    Ok(())
}
