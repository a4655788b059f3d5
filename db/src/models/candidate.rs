use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One examination candidate.
///
/// A candidate starts as a draft without a `registration_number`. Submission
/// assigns the registration number and payment code and flips `is_submitted`,
/// which is never reset afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "candidates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub gender: Gender,
    #[sea_orm(unique)]
    pub registration_number: Option<String>,
    #[sea_orm(unique)]
    pub payment_code: Option<String>,
    pub registration_category: RegistrationCategory,
    pub assessment_center_id: Option<i64>,
    pub assessment_center_branch_id: Option<i64>,
    pub occupation_id: Option<i64>,
    pub entry_year: Option<i32>,
    pub intake: Option<Intake>,
    /// ISO 3166 alpha-2 code; `UG` for Ugandan candidates.
    pub candidate_country: Option<String>,
    /// Free-text nationality kept from older registrations.
    pub nationality: Option<String>,
    pub is_submitted: bool,
    pub verification_status: VerificationStatus,
    pub decline_reason: Option<String>,
    pub payment_cleared: bool,
    pub payment_amount_cleared: Option<i64>,
    pub payment_cleared_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Declaration order is the order categories are reported in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RegistrationCategory {
    #[sea_orm(string_value = "modular")]
    Modular,
    #[sea_orm(string_value = "formal")]
    Formal,
    #[sea_orm(string_value = "workers_pas")]
    WorkersPas,
}

impl RegistrationCategory {
    /// Letter embedded in the registration number.
    pub fn code(self) -> &'static str {
        match self {
            RegistrationCategory::Modular => "M",
            RegistrationCategory::Formal => "F",
            RegistrationCategory::WorkersPas => "W",
        }
    }
}

/// Intake month code: March, June, September, December, August.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(ascii_case_insensitive)]
pub enum Intake {
    #[sea_orm(string_value = "M")]
    M,
    #[sea_orm(string_value = "J")]
    J,
    #[sea_orm(string_value = "S")]
    S,
    #[sea_orm(string_value = "D")]
    D,
    #[sea_orm(string_value = "A")]
    A,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VerificationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "declined")]
    Declined,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessment_center::Entity",
        from = "Column::AssessmentCenterId",
        to = "super::assessment_center::Column::Id"
    )]
    AssessmentCenter,
    #[sea_orm(
        belongs_to = "super::center_branch::Entity",
        from = "Column::AssessmentCenterBranchId",
        to = "super::center_branch::Column::Id"
    )]
    Branch,
    #[sea_orm(
        belongs_to = "super::occupation::Entity",
        from = "Column::OccupationId",
        to = "super::occupation::Column::Id"
    )]
    Occupation,
}

impl Related<super::assessment_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentCenter.def()
    }
}

impl Related<super::occupation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Occupation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Registration numbers already issued to other candidates sharing this
    /// sequence scope (center, occupation, entry year, intake).
    ///
    /// Rows are returned newest first; the caller decides how to parse them.
    pub async fn scope_registration_numbers<C: ConnectionTrait>(
        db: &C,
        assessment_center_id: i64,
        occupation_id: i64,
        entry_year: i32,
        intake: Intake,
        exclude_candidate_id: Option<i64>,
    ) -> Result<Vec<String>, DbErr> {
        let mut query = Entity::find()
            .select_only()
            .column(Column::RegistrationNumber)
            .filter(Column::AssessmentCenterId.eq(assessment_center_id))
            .filter(Column::OccupationId.eq(occupation_id))
            .filter(Column::EntryYear.eq(entry_year))
            .filter(Column::Intake.eq(intake))
            .filter(Column::RegistrationNumber.is_not_null())
            .order_by_desc(Column::Id);

        if let Some(id) = exclude_candidate_id {
            query = query.filter(Column::Id.ne(id));
        }

        let rows: Vec<Option<String>> = query.into_tuple().all(db).await?;
        Ok(rows.into_iter().flatten().collect())
    }
}
