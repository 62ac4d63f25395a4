//! Request DTOs for fee API endpoints.
//!
//! Field names follow the enrollment form's camelCase JSON so the wizard can
//! post its form state as-is. Fields pricing does not use are ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::pricing::models::{
    Course, LessonType, Location, PersonName, PhotoPrivacy, RegistrationRecord, SignupType,
    StartMonth, StudentRecord,
};

/// Request to estimate fees for a registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimateRequest {
    pub signup_type: Option<SignupType>,
    pub location: Option<Location>,
    #[serde(default)]
    pub desired_start_month: Option<MonthInput>,
    #[serde(default)]
    pub last_name_kanji: String,
    #[serde(default)]
    pub first_name_kanji: String,
    #[serde(default)]
    pub students: Vec<StudentRequest>,
    #[serde(default)]
    pub photo_privacy: Option<PhotoPrivacy>,
    /// Evaluate as of this date instead of today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// A student entry in the request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub last_name_kanji: String,
    #[serde(default)]
    pub first_name_kanji: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub lesson_type: Option<LessonType>,
    #[serde(default)]
    pub course: Option<Course>,
}

/// Start month as the form sends it (`"4"`) or as a plain number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MonthInput {
    Number(u32),
    Text(String),
}

impl MonthInput {
    fn parse(&self) -> Result<Option<StartMonth>, AppError> {
        let month = match self {
            MonthInput::Number(n) => *n,
            MonthInput::Text(s) if s.trim().is_empty() => return Ok(None),
            MonthInput::Text(s) => s.trim().parse::<u32>().map_err(|_| {
                AppError::Validation(format!("desiredStartMonth '{}' is not a month", s))
            })?,
        };

        StartMonth::new(month).map(Some).ok_or_else(|| {
            AppError::Validation(format!("desiredStartMonth {} is outside 1-12", month))
        })
    }
}

impl TryFrom<FeeEstimateRequest> for RegistrationRecord {
    type Error = AppError;

    fn try_from(request: FeeEstimateRequest) -> Result<Self, Self::Error> {
        let signup_type = request
            .signup_type
            .ok_or_else(|| AppError::Validation("signupType is required".to_string()))?;
        let location = request
            .location
            .ok_or_else(|| AppError::Validation("location is required".to_string()))?;

        let desired_start_month = match &request.desired_start_month {
            Some(input) => input.parse()?,
            None => None,
        };

        let students = request
            .students
            .into_iter()
            .map(|student| StudentRecord {
                id: student.id.unwrap_or_else(Uuid::new_v4),
                name: PersonName::new(student.last_name_kanji, student.first_name_kanji),
                is_self: student.is_self,
                lesson_type: student.lesson_type,
                course: student.course,
            })
            .collect();

        Ok(RegistrationRecord {
            signup_type,
            location,
            desired_start_month,
            guardian: PersonName::new(request.last_name_kanji, request.first_name_kanji),
            students,
            photo_privacy: request.photo_privacy,
        })
    }
}
