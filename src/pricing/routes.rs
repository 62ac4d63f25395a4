//! HTTP routes for fee estimation.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::requests::FeeEstimateRequest;
use super::responses::FeeSummaryResponse;
use super::services;

/// Fee routes, mounted under `/api/fees`.
pub fn router() -> Router<AppState> {
    Router::new().route("/estimate", post(estimate))
}

/// Estimate fees for the registration in the body
async fn estimate(
    State(state): State<AppState>,
    body: std::result::Result<Json<FeeEstimateRequest>, JsonRejection>,
) -> Result<Json<FeeSummaryResponse>> {
    let Json(request) = body?;
    let estimate = services::estimate_fees(&state.schedule, request, state.config.utc_offset)?;
    Ok(Json(FeeSummaryResponse::new(
        &estimate.summary,
        estimate.calculated_on,
    )))
}
