//! Axum REST handlers over the indexed audit trail.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;
use crate::trail::{self, DonationTrail};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

/// Read-only routes over the indexed audit trail.
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/donations/:id/events", get(get_donation_events))
        .route("/donations/:id/trail", get(get_donation_trail))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(ApiState { pool }))
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DonationEventsResponse {
    pub donation_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IndexerError {
    fn into_response(self) -> Response {
        let status = match self {
            IndexerError::DonationNotFound(_) => StatusCode::NOT_FOUND,
            _ => {
                error!("API request failed: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<AllEventsResponse>, IndexerError> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /donations/:id/events`
pub async fn get_donation_events(
    State(state): State<Arc<ApiState>>,
    Path(donation_id): Path<String>,
) -> Result<Json<DonationEventsResponse>, IndexerError> {
    let events = db::get_events_for_donation(&state.pool, &donation_id).await?;
    Ok(Json(DonationEventsResponse {
        donation_id,
        count: events.len(),
        events,
    }))
}

/// `GET /donations/:id/trail`
///
/// Lifecycle status reconstructed from the donation's events; 404 when
/// nothing has been indexed for it yet.
pub async fn get_donation_trail(
    State(state): State<Arc<ApiState>>,
    Path(donation_id): Path<String>,
) -> Result<Json<DonationTrail>, IndexerError> {
    let events = db::get_events_for_donation(&state.pool, &donation_id).await?;
    trail::project(&donation_id, &events)
        .map(Json)
        .ok_or(IndexerError::DonationNotFound(donation_id))
}
