//! HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dca_engine::{
    feed::{load_price_book, LoadFailure},
    DcaError, PriceBar, Simulation, SimulationConfig, SimulationReport,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub feed: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,

    /// Symbols whose history could not be loaded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bars: Vec<PriceBar>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
            failures: Vec::new(),
        }),
    )
}

/// Map engine errors onto HTTP statuses
fn engine_error(e: &DcaError) -> ApiError {
    match e {
        DcaError::SeriesNotFound(_) => api_error(StatusCode::NOT_FOUND, "SERIES_NOT_FOUND", e.to_string()),
        _ if e.is_configuration() => {
            api_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CONFIGURATION", e.to_string())
        }
        DcaError::Feed(_) | DcaError::Io(_) | DcaError::Serialization(_) => {
            api_error(StatusCode::BAD_GATEWAY, "PRICE_FEED_ERROR", e.to_string())
        }
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, "SIMULATION_ERROR", e.to_string()),
    }
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        feed: state.feed.name().into(),
    })
}

// ============================================================================
// Simulation
// ============================================================================

pub async fn simulate_handler(
    State(state): State<AppState>,
    Json(config): Json<SimulationConfig>,
) -> Result<Json<SimulationReport>, ApiError> {
    let simulation = Simulation::new(config).map_err(|e| {
        tracing::info!("Rejected simulation config: {}", e);
        api_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CONFIGURATION", e.to_string())
    })?;

    let config = simulation.config();
    let outcome = load_price_book(state.feed.as_ref(), &config.allocations, config.start_date, config.end_date)
        .await
        .map_err(|e| {
            tracing::error!("Price load error: {}", e);
            api_error(StatusCode::BAD_GATEWAY, "PRICE_FEED_ERROR", e.to_string())
        })?;

    if !outcome.is_complete() {
        let symbols: Vec<&str> = outcome.failures.iter().map(|f| f.symbol.as_str()).collect();
        tracing::warn!("Missing price history for {}", symbols.join(", "));
        return Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: format!("Price history unavailable for {}", symbols.join(", ")),
                code: "PRICE_FEED_ERROR".into(),
                failures: outcome.failures,
            }),
        ));
    }

    let book = outcome.book;
    let report = tokio::task::spawn_blocking(move || simulation.run(&book))
        .await
        .map_err(|e| {
            tracing::error!("Simulation task failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "SIMULATION_ERROR", "Simulation task failed")
        })?
        .map_err(|e| {
            tracing::error!("Simulation error: {}", e);
            engine_error(&e)
        })?;

    Ok(Json(report))
}

// ============================================================================
// Price History
// ============================================================================

pub async fn prices_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<PriceHistoryResponse>, ApiError> {
    if query.start > query.end {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_CONFIGURATION",
            format!("start {} is after end {}", query.start, query.end),
        ));
    }

    let series = state
        .feed
        .history(&symbol, query.start, query.end)
        .await
        .map_err(|e| {
            tracing::warn!("Price history error for {}: {}", symbol, e);
            engine_error(&e)
        })?;

    Ok(Json(PriceHistoryResponse {
        symbol: series.symbol().to_string(),
        start: query.start,
        end: query.end,
        bars: series.bars(),
    }))
}
