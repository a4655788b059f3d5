use chrono::{NaiveDate, Utc};
use db::models::{
    assessment_center,
    candidate::{self, Gender, Intake, RegistrationCategory, VerificationStatus},
    center_branch, occupation,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::Deserialize;
use validator::Validate;

use crate::error::ServiceError;
use crate::fees;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCandidate {
    #[validate(length(min = 1, max = 200, message = "full_name must not be empty"))]
    pub full_name: String,
    pub gender: Gender,
    pub registration_category: RegistrationCategory,
    pub assessment_center_id: Option<i64>,
    pub assessment_center_branch_id: Option<i64>,
    pub occupation_id: Option<i64>,
    #[validate(range(min = 2000, max = 2100))]
    pub entry_year: Option<i32>,
    pub intake: Option<Intake>,
    #[validate(length(equal = 2, message = "candidate_country must be an ISO alpha-2 code"))]
    pub candidate_country: Option<String>,
    pub nationality: Option<String>,
}

impl CreateCandidate {
    async fn into_active_model(
        self,
        db: &DatabaseConnection,
    ) -> Result<candidate::ActiveModel, ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        if self.full_name.trim().is_empty() {
            return Err(ServiceError::Validation("full_name must not be empty".into()));
        }

        if let Some(center_id) = self.assessment_center_id {
            assessment_center::Entity::find_by_id(center_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Assessment center", center_id))?;
        }
        if let Some(branch_id) = self.assessment_center_branch_id {
            let branch = center_branch::Entity::find_by_id(branch_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Branch", branch_id))?;
            if Some(branch.assessment_center_id) != self.assessment_center_id {
                return Err(ServiceError::Validation(format!(
                    "Branch {branch_id} does not belong to the candidate's assessment center"
                )));
            }
        }
        if let Some(occupation_id) = self.occupation_id {
            occupation::Entity::find_by_id(occupation_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Occupation", occupation_id))?;
        }

        let now = Utc::now();
        Ok(candidate::ActiveModel {
            full_name: Set(self.full_name.trim().to_owned()),
            gender: Set(self.gender),
            registration_category: Set(self.registration_category),
            assessment_center_id: Set(self.assessment_center_id),
            assessment_center_branch_id: Set(self.assessment_center_branch_id),
            occupation_id: Set(self.occupation_id),
            entry_year: Set(self.entry_year),
            intake: Set(self.intake),
            candidate_country: Set(self.candidate_country.map(|c| c.to_uppercase())),
            nationality: Set(self.nationality),
            is_submitted: Set(false),
            verification_status: Set(VerificationStatus::Pending),
            payment_cleared: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

/// Saves a draft. Drafts carry no registration number until submitted.
pub async fn create_candidate(
    db: &DatabaseConnection,
    params: CreateCandidate,
) -> Result<candidate::Model, ServiceError> {
    let created = params.into_active_model(db).await?.insert(db).await?;
    tracing::info!(target: "services::candidates", candidate_id = created.id, "draft candidate created");
    Ok(created)
}

pub async fn get_candidate(
    db: &DatabaseConnection,
    candidate_id: i64,
) -> Result<candidate::Model, ServiceError> {
    candidate::Entity::find_by_id(candidate_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Candidate", candidate_id))
}

pub async fn verify_candidate(
    db: &DatabaseConnection,
    candidate_id: i64,
) -> Result<candidate::Model, ServiceError> {
    let candidate = get_candidate(db, candidate_id).await?;
    if !candidate.is_submitted {
        return Err(ServiceError::Conflict(format!(
            "Candidate {candidate_id} must be submitted before verification"
        )));
    }
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        verification_status: Set(VerificationStatus::Verified),
        decline_reason: Set(None),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(db)
    .await?;
    Ok(updated)
}

pub async fn decline_candidate(
    db: &DatabaseConnection,
    candidate_id: i64,
    reason: &str,
) -> Result<candidate::Model, ServiceError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ServiceError::Validation("A decline reason is required".into()));
    }
    let candidate = get_candidate(db, candidate_id).await?;
    if !candidate.is_submitted {
        return Err(ServiceError::Conflict(format!(
            "Candidate {candidate_id} must be submitted before it can be declined"
        )));
    }
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        verification_status: Set(VerificationStatus::Declined),
        decline_reason: Set(Some(reason.to_owned())),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(db)
    .await?;
    Ok(updated)
}

/// Marks the candidate's payment as cleared and refreshes every fee ledger
/// the candidate appears in. `amount` of `None` clears all fees in full.
pub async fn clear_payment(
    db: &DatabaseConnection,
    candidate_id: i64,
    amount: Option<i64>,
    cleared_on: Option<NaiveDate>,
) -> Result<candidate::Model, ServiceError> {
    if amount.is_some_and(|a| a < 0) {
        return Err(ServiceError::Validation("Cleared amount cannot be negative".into()));
    }
    let candidate = get_candidate(db, candidate_id).await?;
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        payment_cleared: Set(true),
        payment_amount_cleared: Set(amount),
        payment_cleared_date: Set(Some(cleared_on.unwrap_or_else(|| Utc::now().date_naive()))),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(db)
    .await?;

    fees::on_payment_changed(db, candidate_id).await?;
    tracing::info!(target: "services::candidates", candidate_id, ?amount, "payment cleared");
    Ok(updated)
}
