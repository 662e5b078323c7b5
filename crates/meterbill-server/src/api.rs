//! REST API routes
//!
//! Read-only endpoints over the seeded reading store and the cost aggregator.
//! Unknown meters map to 404; reading sets that cannot be priced map to 422.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use meterbill_common::{CostResult, DailyCostResult, MeterbillError, Reading};
use meterbill_pricing::ReadingStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::state::AppState;

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    /// No readings are known for this meter
    MeterNotFound(String),
    /// Readings exist but cannot be priced
    Unprocessable(String),
    /// Anything else
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeterNotFound(meter_id) => write!(f, "Meter not found: {}", meter_id),
            Self::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<MeterbillError> for ApiError {
    fn from(err: MeterbillError) -> Self {
        match err {
            MeterbillError::Pricing(e) => Self::Unprocessable(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::MeterNotFound(_) => (StatusCode::NOT_FOUND, "meter_not_found"),
            Self::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_readings"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if status.is_server_error() {
            warn!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": kind,
            }
        }));
        (status, body).into_response()
    }
}

/// Cost comparison for one meter
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanComparison {
    /// Plan the meter is currently billed on, if it has an account
    pub price_plan_id: Option<String>,
    pub price_plan_comparisons: CostResult,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub limit: Option<usize>,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route("/readings/read/:meter_id", get(read_readings))
        .route("/price-plans/compare-all/:meter_id", get(compare_all))
        .route("/price-plans/compare-all-by-day/:meter_id", get(compare_all_by_day))
        .route("/price-plans/recommend/:meter_id", get(recommend))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": meterbill_common::VERSION,
        "meters": state.store.meter_count(),
        "plans": state.aggregator.catalog().len(),
    }))
}

async fn read_readings(
    State(state): State<AppState>,
    Path(meter_id): Path<String>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    state
        .store
        .get_readings(&meter_id)
        .map(Json)
        .ok_or(ApiError::MeterNotFound(meter_id))
}

async fn compare_all(
    State(state): State<AppState>,
    Path(meter_id): Path<String>,
) -> Result<Json<PlanComparison>, ApiError> {
    let costs = state
        .aggregator
        .cost_per_plan(&meter_id)?
        .ok_or_else(|| ApiError::MeterNotFound(meter_id.clone()))?;

    Ok(Json(PlanComparison {
        price_plan_id: state.accounts.plan_for(&meter_id).map(str::to_string),
        price_plan_comparisons: costs,
    }))
}

async fn compare_all_by_day(
    State(state): State<AppState>,
    Path(meter_id): Path<String>,
) -> Result<Json<DailyCostResult>, ApiError> {
    state
        .aggregator
        .cost_per_plan_per_day(&meter_id)?
        .map(Json)
        .ok_or(ApiError::MeterNotFound(meter_id))
}

async fn recommend(
    State(state): State<AppState>,
    Path(meter_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<Vec<BTreeMap<String, Decimal>>>, ApiError> {
    let ranked = state
        .aggregator
        .recommend(&meter_id, query.limit)?
        .ok_or(ApiError::MeterNotFound(meter_id))?;

    // One single-entry object per plan, cheapest first
    Ok(Json(
        ranked
            .into_iter()
            .map(|p| BTreeMap::from([(p.plan_name, p.cost)]))
            .collect(),
    ))
}
