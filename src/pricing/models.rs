//! Domain models for enrollment fee calculation.
//!
//! These types are what the engine in `calculators` works on. They are built
//! from request DTOs after validation and never read the clock themselves.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the registrant is enrolling for the first time or continuing
/// from last school year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupType {
    #[serde(alias = "新規入会")]
    New,
    #[serde(alias = "継続受講（昨年度より継続）")]
    Continuing,
}

impl SignupType {
    pub fn label(self) -> &'static str {
        match self {
            SignupType::New => "新規入会",
            SignupType::Continuing => "継続受講（昨年度より継続）",
        }
    }
}

/// School site. Each site has its own renewal fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Kuki classroom (site A)
    #[serde(alias = "久喜教室(英和舎内)")]
    Kuki,
    /// Koshigaya classroom (site B)
    #[serde(alias = "越谷教室(藤原バレエ教室内)")]
    Koshigaya,
}

impl Location {
    pub fn label(self) -> &'static str {
        match self {
            Location::Kuki => "久喜教室(英和舎内)",
            Location::Koshigaya => "越谷教室(藤原バレエ教室内)",
        }
    }
}

/// Lesson format a student prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    #[serde(alias = "グループレッスン")]
    Group,
    #[serde(alias = "プライベートレッスン")]
    Private,
    #[serde(alias = "どちらでも可")]
    NoPreference,
}

impl LessonType {
    pub fn label(self) -> &'static str {
        match self {
            LessonType::Group => "グループレッスン",
            LessonType::Private => "プライベートレッスン",
            LessonType::NoPreference => "どちらでも可",
        }
    }
}

/// Course offered by the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    #[serde(alias = "(A) キッズ英語")]
    Kids,
    #[serde(alias = "(B) 中学校英語準備(小6のみ)")]
    JuniorHighPrep,
    #[serde(alias = "(C) 中学英語")]
    JuniorHigh,
    #[serde(alias = "(D) 中学生の英会話")]
    JuniorHighConversation,
    #[serde(alias = "(E) 英語おしゃべりキッズ (幼稚園児対象コース)")]
    KidsChat,
    #[serde(alias = "(F) 英検通年")]
    Eiken,
    #[serde(alias = "(G) STEAM POWERED")]
    Steam,
    #[serde(
        alias = "(H) レニ先生のTRAILBLAZER 『知りたい』が世界へのパスポート。好奇心が育つ英語の冒険。"
    )]
    Trailblazers,
    #[serde(alias = "(I) ニーズに合わせた個人指導")]
    PrivateIndividual,
    #[serde(alias = "(J) オンライン英会話")]
    OnlineConversation,
    #[serde(alias = "ニーズに合わせたプライベートレッスン")]
    GeneralPrivate,
}

impl Course {
    pub fn label(self) -> &'static str {
        match self {
            Course::Kids => "(A) キッズ英語",
            Course::JuniorHighPrep => "(B) 中学校英語準備(小6のみ)",
            Course::JuniorHigh => "(C) 中学英語",
            Course::JuniorHighConversation => "(D) 中学生の英会話",
            Course::KidsChat => "(E) 英語おしゃべりキッズ (幼稚園児対象コース)",
            Course::Eiken => "(F) 英検通年",
            Course::Steam => "(G) STEAM POWERED",
            Course::Trailblazers => {
                "(H) レニ先生のTRAILBLAZER 『知りたい』が世界へのパスポート。好奇心が育つ英語の冒険。"
            }
            Course::PrivateIndividual => "(I) ニーズに合わせた個人指導",
            Course::OnlineConversation => "(J) オンライン英会話",
            Course::GeneralPrivate => "ニーズに合わせたプライベートレッスン",
        }
    }
}

/// Consent for photos taken during lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoPrivacy {
    #[serde(alias = "写真掲載に同意する（顔出し可）")]
    Visible,
    #[serde(alias = "顔をぼかして掲載することを条件に同意する")]
    Blurred,
    #[serde(alias = "写真撮影・掲載を希望しない")]
    NotAllowed,
}

impl PhotoPrivacy {
    pub fn label(self) -> &'static str {
        match self {
            PhotoPrivacy::Visible => "写真掲載に同意する（顔出し可）",
            PhotoPrivacy::Blurred => "顔をぼかして掲載することを条件に同意する",
            PhotoPrivacy::NotAllowed => "写真撮影・掲載を希望しない",
        }
    }
}

/// Calendar month (1-12) a new student wants lessons to begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartMonth(u32);

impl StartMonth {
    /// Returns `None` unless `month` is in 1..=12.
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The month before this one, wrapping January back to December.
    pub fn previous(self) -> u32 {
        if self.0 == 1 {
            12
        } else {
            self.0 - 1
        }
    }

    /// January through March, the fourth school term.
    pub fn is_fourth_term(self) -> bool {
        self.0 <= 3
    }
}

/// Kanji name as entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub family: String,
    pub given: String,
}

impl PersonName {
    pub fn new(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            given: given.into(),
        }
    }

    /// Family and given name separated by a space, as shown on the review page.
    pub fn full(&self) -> String {
        format!("{} {}", self.family.trim(), self.given.trim())
            .trim()
            .to_string()
    }
}

/// One student on the registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: Uuid,
    pub name: PersonName,
    /// The guardian is enrolling themselves.
    pub is_self: bool,
    pub lesson_type: Option<LessonType>,
    pub course: Option<Course>,
}

/// Registration as collected by the wizard, reduced to what pricing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub signup_type: SignupType,
    pub location: Location,
    pub desired_start_month: Option<StartMonth>,
    pub guardian: PersonName,
    pub students: Vec<StudentRecord>,
    pub photo_privacy: Option<PhotoPrivacy>,
}

impl RegistrationRecord {
    /// Name to print on a student's fee line.
    pub fn display_name(&self, student: &StudentRecord) -> String {
        if student.is_self {
            self.guardian.full()
        } else {
            student.name.full()
        }
    }
}

/// What a fee line charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    EnrollmentFee,
    SiblingEnrollmentFee,
    SpecialTermEnrollmentFee,
    RenewalFee,
    LateRenewalFee,
    ReenrollmentFee,
}

impl FeeKind {
    pub fn label(self) -> &'static str {
        match self {
            FeeKind::EnrollmentFee => "初回入会金",
            FeeKind::SiblingEnrollmentFee => "初回入会金 (兄弟割引)",
            FeeKind::SpecialTermEnrollmentFee => "第4期特別入会金",
            FeeKind::RenewalFee => "更新料",
            FeeKind::LateRenewalFee => "更新料 + 遅延手数料",
            FeeKind::ReenrollmentFee => "再入会金",
        }
    }
}

/// One fee line, one per student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeLineItem {
    pub student_name: String,
    pub kind: FeeKind,
    /// Whole yen
    pub amount: u64,
}

impl FeeLineItem {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Fee estimate for a whole registration, valid only for the day it was
/// computed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSummary {
    pub items: Vec<FeeLineItem>,
    pub total_amount: u64,
    pub deadline: String,
    pub global_note: String,
}

impl FeeSummary {
    /// Builds a summary whose total is always the sum of its items.
    pub fn new(items: Vec<FeeLineItem>, deadline: String, global_note: String) -> Self {
        let total_amount = items.iter().map(|item| item.amount).sum();
        Self {
            items,
            total_amount,
            deadline,
            global_note,
        }
    }
}
