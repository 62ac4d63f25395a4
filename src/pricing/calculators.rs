//! Core fee calculation functions.
//!
//! Pure functions for enrollment pricing - no clock or network access. The
//! evaluation date is always passed in, so results are only valid for the
//! calendar day they were computed on.

use chrono::{Datelike, NaiveDate};

use crate::pricing::models::{
    FeeKind, FeeLineItem, FeeSummary, Location, RegistrationRecord, SignupType, StartMonth,
};

/// Deadline text when no concrete start month is known.
pub const GENERIC_DEADLINE: &str = "開始月の前月20日";

/// Renewal payments are due by the end of March.
pub const RENEWAL_DEADLINE: &str = "3月31日";

/// Day of the month before lessons start that new-student payment is due.
const PAYMENT_DAY: u32 = 20;

/// Engine precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    #[error("Registration has no students to charge")]
    NoStudents,
}

/// Fee amounts in whole yen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    pub enrollment_fee: u64,
    pub sibling_enrollment_fee: u64,
    pub special_term_fee: u64,
    pub kuki_renewal_fee: u64,
    pub koshigaya_renewal_fee: u64,
    pub late_surcharge: u64,
    pub reenrollment_fee: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            enrollment_fee: 5000,
            sibling_enrollment_fee: 3000,
            special_term_fee: 1000,
            kuki_renewal_fee: 1000,
            koshigaya_renewal_fee: 2500,
            late_surcharge: 1000,
            reenrollment_fee: 5000,
        }
    }
}

impl FeeSchedule {
    /// Base renewal fee for a site, before any late surcharge.
    pub fn renewal_fee(&self, location: Location) -> u64 {
        match location {
            Location::Kuki => self.kuki_renewal_fee,
            Location::Koshigaya => self.koshigaya_renewal_fee,
        }
    }
}

/// Where an evaluation date falls relative to the March 2 and April 1
/// cutovers for continuing students.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalWindow {
    /// January 1 through March 1
    OnTime,
    /// March 2 through March 31
    Late,
    /// April 1 onwards; continuing registration becomes re-enrollment
    Lapsed,
}

impl RenewalWindow {
    pub fn for_date(today: NaiveDate) -> Self {
        match (today.month(), today.day()) {
            (4..=12, _) => RenewalWindow::Lapsed,
            (3, day) if day >= 2 => RenewalWindow::Late,
            _ => RenewalWindow::OnTime,
        }
    }
}

/// Payment deadline for a new student: the 20th of the month before lessons
/// start.
pub fn payment_deadline(start_month: Option<StartMonth>) -> String {
    match start_month {
        Some(month) => format!("{}月{}日", month.previous(), PAYMENT_DAY),
        None => GENERIC_DEADLINE.to_string(),
    }
}

/// Special fourth-term pricing: submitted December through February for a
/// January through March start.
pub fn is_special_term(today: NaiveDate, start_month: Option<StartMonth>) -> bool {
    let winter_submission = matches!(today.month(), 12 | 1 | 2);
    winter_submission && start_month.is_some_and(StartMonth::is_fourth_term)
}

/// Calculate the fee summary for a registration as of `today`.
///
/// Produces exactly one line per student, in student order.
///
/// # Errors
/// `FeeError::NoStudents` if the registration lists nobody; a zero-yen
/// summary would otherwise look like a valid free enrollment.
pub fn calculate_fees(
    registration: &RegistrationRecord,
    today: NaiveDate,
) -> Result<FeeSummary, FeeError> {
    calculate_fees_with(&FeeSchedule::default(), registration, today)
}

/// Same as [`calculate_fees`] against an explicit schedule.
pub fn calculate_fees_with(
    schedule: &FeeSchedule,
    registration: &RegistrationRecord,
    today: NaiveDate,
) -> Result<FeeSummary, FeeError> {
    if registration.students.is_empty() {
        return Err(FeeError::NoStudents);
    }

    let summary = match registration.signup_type {
        SignupType::New => new_enrollment_fees(schedule, registration, today),
        SignupType::Continuing => continuing_fees(schedule, registration, today),
    };

    tracing::debug!(
        "Fees as of {} for {:?}/{:?}: {} lines, total {}",
        today,
        registration.signup_type,
        registration.location,
        summary.items.len(),
        summary.total_amount
    );

    Ok(summary)
}

fn new_enrollment_fees(
    schedule: &FeeSchedule,
    registration: &RegistrationRecord,
    today: NaiveDate,
) -> FeeSummary {
    let start_month = registration.desired_start_month;
    let deadline = payment_deadline(start_month);

    if is_special_term(today, start_month) {
        let items = line_items(registration, |_| {
            (FeeKind::SpecialTermEnrollmentFee, schedule.special_term_fee)
        });
        let note = "※12月〜2月のお申し込みで1月〜3月に開始されるため、第4期特別入会金が適用されます。";
        return FeeSummary::new(items, deadline, note.to_string());
    }

    // Only the first student in the household pays the full fee.
    let items = line_items(registration, |index| {
        if index == 0 {
            (FeeKind::EnrollmentFee, schedule.enrollment_fee)
        } else {
            (FeeKind::SiblingEnrollmentFee, schedule.sibling_enrollment_fee)
        }
    });

    let month = today.month();
    let note = if month >= 11 || month <= 3 {
        "※11月以降のお申し込みのため入会金が減額となる場合があります。金額は教室からのご連絡をもって確定します。"
    } else {
        "※翌年4月の更新時に別途更新料が発生します。"
    };

    FeeSummary::new(items, deadline, note.to_string())
}

fn continuing_fees(
    schedule: &FeeSchedule,
    registration: &RegistrationRecord,
    today: NaiveDate,
) -> FeeSummary {
    let renewal_fee = schedule.renewal_fee(registration.location);

    match RenewalWindow::for_date(today) {
        RenewalWindow::Lapsed => {
            let items = line_items(registration, |_| {
                (FeeKind::ReenrollmentFee, schedule.reenrollment_fee)
            });
            FeeSummary::new(
                items,
                GENERIC_DEADLINE.to_string(),
                "※3月31日を過ぎてのお申し込みのため、継続受講ではなく再入会の扱いとなります。"
                    .to_string(),
            )
        }
        RenewalWindow::Late => {
            let amount = renewal_fee + schedule.late_surcharge;
            let items = line_items(registration, |_| (FeeKind::LateRenewalFee, amount));
            FeeSummary::new(
                items,
                RENEWAL_DEADLINE.to_string(),
                format!(
                    "※3月1日の締切を過ぎての登録のため、遅延手数料{}円が加算されています。",
                    group_thousands(schedule.late_surcharge)
                ),
            )
        }
        RenewalWindow::OnTime => {
            let items = line_items(registration, |_| (FeeKind::RenewalFee, renewal_fee));
            let note = match registration.location {
                Location::Kuki => "※3月1日までの早期更新価格です。",
                Location::Koshigaya => "※3月1日までの通常更新価格です。",
            };
            FeeSummary::new(items, RENEWAL_DEADLINE.to_string(), note.to_string())
        }
    }
}

/// One line per student, priced by the student's position in the list.
fn line_items<F>(registration: &RegistrationRecord, price: F) -> Vec<FeeLineItem>
where
    F: Fn(usize) -> (FeeKind, u64),
{
    registration
        .students
        .iter()
        .enumerate()
        .map(|(index, student)| {
            let (kind, amount) = price(index);
            FeeLineItem {
                student_name: registration.display_name(student),
                kind,
                amount,
            }
        })
        .collect()
}

/// Format an amount with comma thousands separators (`12500` -> `12,500`).
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{PersonName, StudentRecord};
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn student(family: &str, given: &str) -> StudentRecord {
        StudentRecord {
            id: Uuid::new_v4(),
            name: PersonName::new(family, given),
            is_self: false,
            lesson_type: None,
            course: None,
        }
    }

    fn registration(
        signup_type: SignupType,
        location: Location,
        start: Option<u32>,
        count: usize,
    ) -> RegistrationRecord {
        RegistrationRecord {
            signup_type,
            location,
            desired_start_month: start.and_then(StartMonth::new),
            guardian: PersonName::new("佐藤", "恵子"),
            students: (0..count)
                .map(|i| student("佐藤", &format!("子{}", i + 1)))
                .collect(),
            photo_privacy: None,
        }
    }

    fn amounts(summary: &FeeSummary) -> Vec<u64> {
        summary.items.iter().map(|item| item.amount).collect()
    }

    // ==================== new enrollment tests ====================

    #[test]
    fn test_new_sibling_tiering() {
        let reg = registration(SignupType::New, Location::Kuki, Some(9), 3);
        let summary = calculate_fees(&reg, date(2025, 7, 15)).unwrap();

        assert_eq!(amounts(&summary), vec![5000, 3000, 3000]);
        assert_eq!(summary.total_amount, 11000);
        assert_eq!(summary.items[0].kind, FeeKind::EnrollmentFee);
        assert_eq!(summary.items[1].kind, FeeKind::SiblingEnrollmentFee);
        assert_eq!(summary.deadline, "8月20日");
        assert!(summary.global_note.contains("4月の更新時"));
    }

    #[test]
    fn test_new_sibling_tiering_without_start_month() {
        let reg = registration(SignupType::New, Location::Koshigaya, None, 3);
        let summary = calculate_fees(&reg, date(2025, 7, 15)).unwrap();

        assert_eq!(summary.total_amount, 11000);
        assert_eq!(summary.deadline, GENERIC_DEADLINE);
    }

    #[test]
    fn test_new_special_fourth_term() {
        let reg = registration(SignupType::New, Location::Kuki, Some(2), 2);
        let summary = calculate_fees(&reg, date(2025, 12, 10)).unwrap();

        assert_eq!(amounts(&summary), vec![1000, 1000]);
        assert_eq!(summary.total_amount, 2000);
        assert!(summary
            .items
            .iter()
            .all(|item| item.kind == FeeKind::SpecialTermEnrollmentFee));
        assert!(summary.global_note.contains("第4期特別入会金"));
        assert_eq!(summary.deadline, "1月20日");
    }

    #[test]
    fn test_new_january_start_deadline_wraps_to_december() {
        let reg = registration(SignupType::New, Location::Kuki, Some(1), 1);
        let summary = calculate_fees(&reg, date(2025, 12, 1)).unwrap();
        assert_eq!(summary.deadline, "12月20日");
    }

    #[test]
    fn test_new_special_term_requires_winter_start() {
        // Winter submission but an April start: regular tiering with the
        // seasonal advisory.
        let reg = registration(SignupType::New, Location::Kuki, Some(4), 2);
        let summary = calculate_fees(&reg, date(2026, 1, 15)).unwrap();

        assert_eq!(amounts(&summary), vec![5000, 3000]);
        assert!(summary.global_note.contains("減額"));
    }

    #[test]
    fn test_new_special_term_requires_winter_submission() {
        // November is in the advisory window but not the special window.
        let reg = registration(SignupType::New, Location::Kuki, Some(1), 1);
        let summary = calculate_fees(&reg, date(2025, 11, 30)).unwrap();

        assert_eq!(amounts(&summary), vec![5000]);
        assert!(summary.global_note.contains("減額"));
    }

    #[test]
    fn test_new_march_submission_is_outside_special_window() {
        let reg = registration(SignupType::New, Location::Kuki, Some(3), 1);
        let summary = calculate_fees(&reg, date(2026, 3, 1)).unwrap();
        assert_eq!(amounts(&summary), vec![5000]);
    }

    #[test]
    fn test_is_special_term_window() {
        let feb = StartMonth::new(2);
        assert!(is_special_term(date(2025, 12, 1), feb));
        assert!(is_special_term(date(2026, 1, 31), feb));
        assert!(is_special_term(date(2026, 2, 28), feb));
        assert!(!is_special_term(date(2025, 11, 30), feb));
        assert!(!is_special_term(date(2026, 3, 1), feb));
        assert!(!is_special_term(date(2026, 1, 10), None));
    }

    #[test]
    fn test_self_enrolled_student_uses_guardian_name() {
        let mut reg = registration(SignupType::New, Location::Kuki, Some(6), 2);
        reg.students[0].is_self = true;
        let summary = calculate_fees(&reg, date(2025, 5, 1)).unwrap();

        assert_eq!(summary.items[0].student_name, "佐藤 恵子");
        assert_eq!(summary.items[1].student_name, "佐藤 子2");
    }

    // ==================== continuing tests ====================

    #[test]
    fn test_continuing_march_boundary() {
        let reg = registration(SignupType::Continuing, Location::Kuki, None, 2);

        let on_time = calculate_fees(&reg, date(2026, 3, 1)).unwrap();
        assert_eq!(amounts(&on_time), vec![1000, 1000]);
        assert!(on_time.items.iter().all(|i| i.kind == FeeKind::RenewalFee));

        let late = calculate_fees(&reg, date(2026, 3, 2)).unwrap();
        assert_eq!(amounts(&late), vec![2000, 2000]);
        assert!(late.items.iter().all(|i| i.kind == FeeKind::LateRenewalFee));
        assert!(late.global_note.contains("1,000円"));
        assert_eq!(late.deadline, RENEWAL_DEADLINE);
    }

    #[test]
    fn test_continuing_april_rollover() {
        let reg = registration(SignupType::Continuing, Location::Koshigaya, None, 2);

        let last_day = calculate_fees(&reg, date(2026, 3, 31)).unwrap();
        assert_eq!(amounts(&last_day), vec![3500, 3500]);
        assert_eq!(last_day.deadline, RENEWAL_DEADLINE);

        let rolled = calculate_fees(&reg, date(2026, 4, 1)).unwrap();
        assert_eq!(amounts(&rolled), vec![5000, 5000]);
        assert!(rolled.items.iter().all(|i| i.kind == FeeKind::ReenrollmentFee));
        assert_eq!(rolled.deadline, GENERIC_DEADLINE);
        assert!(rolled.global_note.contains("再入会"));
    }

    #[test]
    fn test_continuing_reenrollment_is_not_sibling_tiered() {
        let reg = registration(SignupType::Continuing, Location::Kuki, None, 3);
        let summary = calculate_fees(&reg, date(2025, 10, 16)).unwrap();
        assert_eq!(summary.total_amount, 15000);
    }

    #[test]
    fn test_continuing_location_pricing() {
        let kuki = registration(SignupType::Continuing, Location::Kuki, None, 2);
        let koshigaya = registration(SignupType::Continuing, Location::Koshigaya, None, 2);
        let today = date(2026, 2, 10);

        let kuki_summary = calculate_fees(&kuki, today).unwrap();
        let koshigaya_summary = calculate_fees(&koshigaya, today).unwrap();

        assert_eq!(amounts(&kuki_summary), vec![1000, 1000]);
        assert_eq!(amounts(&koshigaya_summary), vec![2500, 2500]);
        assert!(kuki_summary.global_note.contains("早期更新"));
        assert!(koshigaya_summary.global_note.contains("通常更新"));
    }

    #[test]
    fn test_renewal_window_for_date() {
        assert_eq!(RenewalWindow::for_date(date(2026, 1, 1)), RenewalWindow::OnTime);
        assert_eq!(RenewalWindow::for_date(date(2026, 3, 1)), RenewalWindow::OnTime);
        assert_eq!(RenewalWindow::for_date(date(2026, 3, 2)), RenewalWindow::Late);
        assert_eq!(RenewalWindow::for_date(date(2026, 3, 31)), RenewalWindow::Late);
        assert_eq!(RenewalWindow::for_date(date(2026, 4, 1)), RenewalWindow::Lapsed);
        assert_eq!(RenewalWindow::for_date(date(2026, 12, 31)), RenewalWindow::Lapsed);
    }

    // ==================== invariants ====================

    #[test]
    fn test_empty_students_is_an_error() {
        let reg = registration(SignupType::New, Location::Kuki, Some(4), 0);
        assert_eq!(
            calculate_fees(&reg, date(2025, 7, 15)),
            Err(FeeError::NoStudents)
        );
    }

    #[test]
    fn test_sum_and_cardinality_hold_across_the_year() {
        let mut day = date(2025, 1, 1);
        while day < date(2026, 1, 1) {
            for signup_type in [SignupType::New, SignupType::Continuing] {
                for location in [Location::Kuki, Location::Koshigaya] {
                    let reg = registration(signup_type, location, Some(day.month()), 3);
                    let summary = calculate_fees(&reg, day).unwrap();
                    assert_eq!(summary.items.len(), reg.students.len());
                    assert_eq!(summary.total_amount, amounts(&summary).iter().sum::<u64>());
                }
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_idempotent() {
        let reg = registration(SignupType::New, Location::Koshigaya, Some(2), 2);
        let today = date(2026, 1, 5);
        assert_eq!(
            calculate_fees(&reg, today).unwrap(),
            calculate_fees(&reg, today).unwrap()
        );
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = FeeSchedule {
            late_surcharge: 1500,
            ..FeeSchedule::default()
        };
        let reg = registration(SignupType::Continuing, Location::Kuki, None, 1);
        let summary = calculate_fees_with(&schedule, &reg, date(2026, 3, 15)).unwrap();
        assert_eq!(summary.total_amount, 2500);
        assert!(summary.global_note.contains("1,500円"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(11000), "11,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
