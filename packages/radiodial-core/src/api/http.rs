//! HTTP route handlers.
//!
//! All handlers are thin - they delegate to the catalog and services.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::artwork::ArtworkMatch;
use crate::catalog::{NewStation, Station};
use crate::error::{RadiodialError, RadiodialResult, ValidationError};
use crate::protocol_constants::SERVICE_ID;
use crate::services::NowPlaying;
use crate::stream::StreamMetadata;

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArtworkQuery {
    artist: Option<String>,
    title: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/stations", get(list_stations).post(create_station))
        .route("/api/stations/{id}", get(get_station))
        .route("/api/stations/{id}/metadata", get(get_station_metadata))
        .route("/api/stations/{id}/now-playing", get(get_now_playing))
        .route("/api/artwork", get(get_artwork))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves a path id to a station.
///
/// Ids that are not integers cannot name a station and are reported as 404.
fn find_station(state: &AppState, id: &str) -> RadiodialResult<Station> {
    id.parse::<i64>()
        .ok()
        .and_then(|id| state.catalog.get(id))
        .ok_or_else(|| RadiodialError::StationNotFound(id.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness probe.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_ID,
        "stations": state.catalog.count(),
    }))
}

/// GET /api/stations
async fn list_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(state.catalog.list())
}

/// POST /api/stations
///
/// Malformed JSON is reported like any other validation failure.
async fn create_station(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RadiodialResult<impl IntoResponse> {
    let Json(body) = payload.map_err(|rejection| ValidationError::new("", rejection.body_text()))?;
    let new_station = NewStation::from_json(&body)?;
    let station = state.catalog.create(new_station)?;

    log::info!("[Server] Station {} created: {}", station.id, station.name);
    Ok((StatusCode::CREATED, Json(station)))
}

/// GET /api/stations/:id
async fn get_station(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> RadiodialResult<Json<Station>> {
    find_station(&state, &id).map(Json)
}

/// GET /api/stations/:id/metadata
///
/// HLS stations carry no ICY metadata and are answered without touching
/// the origin.
async fn get_station_metadata(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> RadiodialResult<Json<StreamMetadata>> {
    let station = find_station(&state, &id)?;
    if !station.stream_kind().supports_icy() {
        return Ok(Json(StreamMetadata::default()));
    }

    Ok(Json(state.metadata.fetch(&station.url).await))
}

/// GET /api/stations/:id/now-playing
async fn get_now_playing(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> RadiodialResult<Json<Option<NowPlaying>>> {
    let station = find_station(&state, &id)?;
    Ok(Json(state.now_playing.resolve(&station).await))
}

/// GET /api/artwork?artist=&title=
async fn get_artwork(
    Query(query): Query<ArtworkQuery>,
    State(state): State<AppState>,
) -> Json<ArtworkMatch> {
    Json(
        state
            .artwork
            .lookup(query.artist.as_deref(), query.title.as_deref())
            .await,
    )
}
