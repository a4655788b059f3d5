use chrono::NaiveDate;
use db::models::candidate::{self, Gender, Intake, RegistrationCategory, VerificationStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: i64,
    pub full_name: String,
    pub gender: Gender,
    pub registration_number: Option<String>,
    pub payment_code: Option<String>,
    pub registration_category: RegistrationCategory,
    pub assessment_center_id: Option<i64>,
    pub assessment_center_branch_id: Option<i64>,
    pub occupation_id: Option<i64>,
    pub entry_year: Option<i32>,
    pub intake: Option<Intake>,
    pub candidate_country: Option<String>,
    pub nationality: Option<String>,
    pub is_submitted: bool,
    pub verification_status: VerificationStatus,
    pub decline_reason: Option<String>,
    pub payment_cleared: bool,
    pub payment_amount_cleared: Option<i64>,
    pub payment_cleared_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<candidate::Model> for CandidateResponse {
    fn from(c: candidate::Model) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name,
            gender: c.gender,
            registration_number: c.registration_number,
            payment_code: c.payment_code,
            registration_category: c.registration_category,
            assessment_center_id: c.assessment_center_id,
            assessment_center_branch_id: c.assessment_center_branch_id,
            occupation_id: c.occupation_id,
            entry_year: c.entry_year,
            intake: c.intake,
            candidate_country: c.candidate_country,
            nationality: c.nationality,
            is_submitted: c.is_submitted,
            verification_status: c.verification_status,
            decline_reason: c.decline_reason,
            payment_cleared: c.payment_cleared,
            payment_amount_cleared: c.payment_amount_cleared,
            payment_cleared_date: c.payment_cleared_date,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeclineRequest {
    #[validate(length(min = 1, message = "A decline reason is required"))]
    pub reason: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClearPaymentRequest {
    #[validate(range(min = 0, message = "Cleared amount cannot be negative"))]
    pub amount: Option<i64>,
    pub cleared_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CandidateIdsRequest {
    #[validate(length(min = 1, message = "At least one candidate id is required"))]
    pub candidate_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeCenterRequest {
    #[validate(length(min = 1, message = "At least one candidate id is required"))]
    pub candidate_ids: Vec<i64>,
    pub assessment_center_id: i64,
    pub assessment_center_branch_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeOccupationRequest {
    #[validate(length(min = 1, message = "At least one candidate id is required"))]
    pub candidate_ids: Vec<i64>,
    pub occupation_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeCategoryRequest {
    #[validate(length(min = 1, message = "At least one candidate id is required"))]
    pub candidate_ids: Vec<i64>,
    pub registration_category: RegistrationCategory,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub series_id: i64,
}
