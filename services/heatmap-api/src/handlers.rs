//! HTTP request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, instrument, warn};

use heatmap_common::{HeatmapError, TileCoord};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsResponse {
    pub generation: u64,
    pub loaded_at: String,
    pub count: usize,
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse the `{z}/{x}/{y}.png` path segments.
pub fn parse_tile_path(z: &str, x: &str, y_file: &str) -> Result<(u32, u32, u32), String> {
    let y = y_file
        .strip_suffix(".png")
        .ok_or_else(|| format!("Unsupported tile format '{}', expected .png", y_file))?;

    let parse = |name: &str, value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| format!("Invalid {} '{}': expected a non-negative integer", name, value))
    };

    Ok((parse("zoom", z)?, parse("x", x)?, parse("y", y)?))
}

fn error_response(err: &HeatmapError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string()).into_response()
}

fn png_response(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        bytes,
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Liveness text
pub async fn root_handler() -> &'static str {
    "hey!"
}

/// GET /health - Basic health check
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "heatmap-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /tiles/:z/:x/:y.png - Render and return a heatmap tile
#[instrument(skip(state))]
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((z, x, y_file)): Path<(String, String, String)>,
) -> Response {
    let start = Instant::now();

    let (z, x, y) = match parse_tile_path(&z, &x, &y_file) {
        Ok(parts) => parts,
        Err(msg) => {
            state.metrics.record_error();
            return (StatusCode::BAD_REQUEST, msg).into_response();
        }
    };

    let coord = match TileCoord::new(z, x, y) {
        Ok(coord) => coord,
        Err(e) => {
            state.metrics.record_error();
            warn!(error = %e, "Rejected tile request");
            return error_response(&e);
        }
    };

    let snapshot = state.points.current().await;
    let renderer = state.renderer.clone();
    let rendered =
        tokio::task::spawn_blocking(move || renderer.render_tile(&coord, &snapshot)).await;

    let tile = match rendered {
        Ok(Ok(tile)) => tile,
        Ok(Err(e)) => {
            state.metrics.record_error();
            error!(tile = %coord, error = %e, "Tile render failed");
            return error_response(&e);
        }
        Err(e) => {
            state.metrics.record_error();
            error!(tile = %coord, error = %e, "Render task panicked");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Render task failed").into_response();
        }
    };

    let elapsed_us = start.elapsed().as_micros() as u64;
    state
        .metrics
        .record_tile(elapsed_us, tile.is_placeholder())
        .await;
    png_response(tile.png)
}

/// GET /api/points - Current point snapshot summary
pub async fn points_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.points.current().await;
    Json(PointsResponse {
        generation: snapshot.generation,
        loaded_at: snapshot.loaded_at.to_rfc3339(),
        count: snapshot.len(),
    })
}

/// GET /api/metrics - In-process counters as JSON
pub async fn api_metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.metrics.snapshot().await)
}

/// GET /metrics - Prometheus metrics endpoint
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.prometheus.render(),
    )
        .into_response()
}
