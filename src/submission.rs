//! Submission payload for the enrollment webhook.
//!
//! The wizard's final step posts the whole form here once the guardian has
//! accepted the terms and acknowledged the bank-transfer notice. The form is
//! passed through untouched with the fee total merged in; delivering it to
//! the webhook is the caller's job.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::pricing::calculators::FeeSchedule;
use crate::pricing::requests::FeeEstimateRequest;
use crate::pricing::responses::FeeSummaryResponse;
use crate::pricing::services::{self, FeeEstimate};
use crate::AppState;

/// Submission routes, mounted under `/api/submissions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/payload", post(payload))
}

async fn payload(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(form) = body?;
    let payload = prepare_submission(
        &state.schedule,
        form,
        state.config.utc_offset,
        state.config.submission_token.as_deref(),
    )?;
    Ok(Json(payload))
}

/// Validate the form, price it as of today and build the outbound payload.
///
/// A client-supplied `asOf` is dropped: the booked total is always priced on
/// the school's current calendar day.
pub fn prepare_submission(
    schedule: &FeeSchedule,
    form: Value,
    utc_offset: chrono::FixedOffset,
    token: Option<&str>,
) -> Result<Value> {
    let Value::Object(mut form) = form else {
        return Err(AppError::Validation(
            "submission body must be a JSON object".to_string(),
        ));
    };

    require_flag(&form, "agreedToTerms")?;
    require_flag(&form, "paymentNoticeAcknowledged")?;

    if form.remove("asOf").is_some() {
        tracing::warn!("Ignoring asOf on submission; pricing as of today");
    }

    let request: FeeEstimateRequest = serde_json::from_value(Value::Object(form.clone()))?;
    let estimate = services::estimate_fees(schedule, request, utc_offset)?;

    build_payload(form, &estimate, token)
}

fn require_flag(form: &Map<String, Value>, field: &'static str) -> Result<()> {
    match form.get(field) {
        Some(Value::Bool(true)) => Ok(()),
        _ => {
            tracing::warn!("Submission rejected: {} not set", field);
            Err(AppError::NotAcknowledged(field))
        }
    }
}

/// Merge the fee estimate (and shared token, if any) into the form.
pub fn build_payload(
    mut form: Map<String, Value>,
    estimate: &FeeEstimate,
    token: Option<&str>,
) -> Result<Value> {
    let summary = FeeSummaryResponse::new(&estimate.summary, estimate.calculated_on);

    form.insert(
        "totalAmount".to_string(),
        Value::from(estimate.summary.total_amount),
    );
    form.insert("feeSummary".to_string(), serde_json::to_value(&summary)?);
    form.insert(
        "calculatedOn".to_string(),
        Value::from(estimate.calculated_on.to_string()),
    );
    if let Some(token) = token {
        form.insert("token".to_string(), Value::from(token));
    }

    Ok(Value::Object(form))
}
