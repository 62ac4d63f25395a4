//! Fee service functions.
//!
//! Resolves the evaluation date for a request and runs the calculators on
//! it. This is the only place the wall clock is read.

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::error::AppError;

use super::calculators::{calculate_fees_with, FeeSchedule};
use super::models::{FeeSummary, RegistrationRecord};
use super::requests::FeeEstimateRequest;

/// Result of a fee estimation
#[derive(Debug, Clone)]
pub struct FeeEstimate {
    pub record: RegistrationRecord,
    pub summary: FeeSummary,
    pub calculated_on: NaiveDate,
}

/// Today's date on the school's local calendar.
pub fn local_today(utc_offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&utc_offset).date_naive()
}

/// Estimate fees for a registration request.
///
/// # Arguments
/// * `schedule` - Fee amounts to apply
/// * `request` - Registration form as posted by the wizard
/// * `utc_offset` - School's local offset, used when the request has no `asOf`
///
/// # Returns
/// `FeeEstimate` with the validated record, the summary and the date it holds for
pub fn estimate_fees(
    schedule: &FeeSchedule,
    request: FeeEstimateRequest,
    utc_offset: FixedOffset,
) -> Result<FeeEstimate, AppError> {
    let calculated_on = request.as_of.unwrap_or_else(|| local_today(utc_offset));
    let record = RegistrationRecord::try_from(request)?;

    let summary = calculate_fees_with(schedule, &record, calculated_on).map_err(|e| {
        tracing::warn!("Fee calculation rejected: {}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Estimated {} fees at {} on {}: {} student(s), total ¥{}",
        record.signup_type.label(),
        record.location.label(),
        calculated_on,
        summary.items.len(),
        summary.total_amount
    );

    Ok(FeeEstimate {
        record,
        summary,
        calculated_on,
    })
}
