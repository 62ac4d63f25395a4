//! Response DTOs for fee API endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::pricing::calculators::group_thousands;
use crate::pricing::models::{FeeKind, FeeLineItem, FeeSummary};

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    pub amount: u64,
    pub currency: &'static str,
    /// Formatted for display, e.g. `¥5,000`
    pub display: String,
}

impl MoneyResponse {
    pub fn yen(amount: u64) -> Self {
        Self {
            amount,
            currency: "JPY",
            display: format!("¥{}", group_thousands(amount)),
        }
    }
}

/// A per-student fee line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLineResponse {
    pub student_name: String,
    pub kind: FeeKind,
    pub label: &'static str,
    pub amount: MoneyResponse,
}

impl From<&FeeLineItem> for FeeLineResponse {
    fn from(item: &FeeLineItem) -> Self {
        Self {
            student_name: item.student_name.clone(),
            kind: item.kind,
            label: item.label(),
            amount: MoneyResponse::yen(item.amount),
        }
    }
}

/// Response for fee estimation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummaryResponse {
    pub items: Vec<FeeLineResponse>,
    pub total_amount: MoneyResponse,
    pub deadline: String,
    pub global_note: String,
    /// Date the estimate was calculated for; it is stale on any other day.
    pub calculated_on: NaiveDate,
}

impl FeeSummaryResponse {
    pub fn new(summary: &FeeSummary, calculated_on: NaiveDate) -> Self {
        Self {
            items: summary.items.iter().map(FeeLineResponse::from).collect(),
            total_amount: MoneyResponse::yen(summary.total_amount),
            deadline: summary.deadline.clone(),
            global_note: summary.global_note.clone(),
            calculated_on,
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_response_display() {
        let money = MoneyResponse::yen(11000);
        assert_eq!(money.amount, 11000);
        assert_eq!(money.currency, "JPY");
        assert_eq!(money.display, "¥11,000");
    }

    #[test]
    fn test_summary_response_shape() {
        let summary = FeeSummary::new(
            vec![FeeLineItem {
                student_name: "田中 翔".to_string(),
                kind: FeeKind::LateRenewalFee,
                amount: 3500,
            }],
            "3月31日".to_string(),
            "note".to_string(),
        );
        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let json = serde_json::to_value(FeeSummaryResponse::new(&summary, day)).unwrap();

        assert_eq!(json["items"][0]["studentName"], "田中 翔");
        assert_eq!(json["items"][0]["kind"], "late_renewal_fee");
        assert_eq!(json["items"][0]["label"], "更新料 + 遅延手数料");
        assert_eq!(json["items"][0]["amount"]["display"], "¥3,500");
        assert_eq!(json["totalAmount"]["amount"], 3500);
        assert_eq!(json["deadline"], "3月31日");
        assert_eq!(json["globalNote"], "note");
        assert_eq!(json["calculatedOn"], "2026-03-10");
    }
}
