//! Registration number allocation and the actions that reissue it.
//!
//! Numbers are allocated optimistically: scan the scope for the highest
//! sequence, write `max + 1`, and on a unique-index rejection try the next
//! value. After [`RetryPolicy::max_attempts`] rejections the storage error is
//! returned to the caller.

use async_trait::async_trait;
use chrono::Utc;
use db::models::{
    assessment_center, candidate,
    candidate::{Intake, RegistrationCategory},
    center_branch, occupation,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    TransactionTrait,
};
use util::config;

use crate::error::{BulkOutcome, ServiceError, is_unique_violation};
use crate::{enrollment, fees};
use crate::identifiers::{self, RegistrationComponents};

/// Candidates that share a scope draw from one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceScope {
    pub assessment_center_id: i64,
    pub occupation_id: i64,
    pub entry_year: i32,
    pub intake: Intake,
}

impl SequenceScope {
    pub fn of(candidate: &candidate::Model) -> Option<Self> {
        Some(Self {
            assessment_center_id: candidate.assessment_center_id?,
            occupation_id: candidate.occupation_id?,
            entry_year: candidate.entry_year?,
            intake: candidate.intake?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub sequence_width: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            sequence_width: identifiers::DEFAULT_SEQUENCE_WIDTH,
        }
    }
}

impl RetryPolicy {
    pub fn from_config() -> Self {
        Self {
            max_attempts: config::registration_max_attempts().max(1),
            sequence_width: config::registration_sequence_width(),
        }
    }
}

/// Storage used by the allocator.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn center_number(&self, assessment_center_id: i64) -> Result<Option<String>, DbErr>;

    async fn occupation_code(&self, occupation_id: i64) -> Result<Option<String>, DbErr>;

    /// Registration numbers held by other candidates in `scope`.
    async fn numbers_in_scope(
        &self,
        scope: SequenceScope,
        exclude_candidate_id: i64,
    ) -> Result<Vec<String>, DbErr>;

    /// Persists `registration_number`, `payment_code` and `is_submitted`.
    async fn save_identifiers(&self, candidate: &candidate::Model) -> Result<candidate::Model, DbErr>;
}

/// Store over a connection or an open transaction.
pub struct SeaOrmRegistrationStore<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmRegistrationStore<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> RegistrationStore for SeaOrmRegistrationStore<'_, C> {
    async fn center_number(&self, assessment_center_id: i64) -> Result<Option<String>, DbErr> {
        Ok(assessment_center::Entity::find_by_id(assessment_center_id)
            .one(self.db)
            .await?
            .map(|c| c.center_number))
    }

    async fn occupation_code(&self, occupation_id: i64) -> Result<Option<String>, DbErr> {
        Ok(occupation::Entity::find_by_id(occupation_id)
            .one(self.db)
            .await?
            .map(|o| o.occ_code))
    }

    async fn numbers_in_scope(
        &self,
        scope: SequenceScope,
        exclude_candidate_id: i64,
    ) -> Result<Vec<String>, DbErr> {
        candidate::Model::scope_registration_numbers(
            self.db,
            scope.assessment_center_id,
            scope.occupation_id,
            scope.entry_year,
            scope.intake,
            Some(exclude_candidate_id),
        )
        .await
    }

    async fn save_identifiers(&self, candidate: &candidate::Model) -> Result<candidate::Model, DbErr> {
        candidate::ActiveModel {
            id: Set(candidate.id),
            registration_number: Set(candidate.registration_number.clone()),
            payment_code: Set(candidate.payment_code.clone()),
            is_submitted: Set(candidate.is_submitted),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }
}

async fn resolve_components<S: RegistrationStore + ?Sized>(
    store: &S,
    candidate: &candidate::Model,
) -> Result<Option<RegistrationComponents>, DbErr> {
    let (Some(center_id), Some(occupation_id)) =
        (candidate.assessment_center_id, candidate.occupation_id)
    else {
        return Ok(None);
    };
    if candidate.entry_year.is_none() || candidate.intake.is_none() {
        return Ok(None);
    }

    let center_number = store.center_number(center_id).await?;
    let occupation_code = store.occupation_code(occupation_id).await?;
    Ok(RegistrationComponents::resolve(
        candidate,
        center_number.as_deref(),
        occupation_code.as_deref(),
    ))
}

/// Next registration number for `candidate`, or `None` when its center,
/// occupation, entry year or intake is missing. Nothing is written.
pub async fn generate_registration_number<S: RegistrationStore + ?Sized>(
    store: &S,
    candidate: &candidate::Model,
    policy: RetryPolicy,
) -> Result<Option<String>, DbErr> {
    let Some(components) = resolve_components(store, candidate).await? else {
        return Ok(None);
    };
    let Some(scope) = SequenceScope::of(candidate) else {
        return Ok(None);
    };
    let existing = store.numbers_in_scope(scope, candidate.id).await?;
    let sequence = identifiers::next_sequence(&existing);
    Ok(Some(identifiers::format_registration_number(
        &components,
        sequence,
        policy.sequence_width,
    )))
}

/// Payment code for a persisted candidate, or `None` when its center, entry
/// year or id is missing.
pub async fn generate_payment_code<S: RegistrationStore + ?Sized>(
    store: &S,
    candidate: &candidate::Model,
) -> Result<Option<String>, DbErr> {
    let Some(center_id) = candidate.assessment_center_id else {
        return Ok(None);
    };
    let center_number = store.center_number(center_id).await?;
    Ok(identifiers::payment_code_for(candidate, center_number.as_deref()))
}

#[derive(Debug, Clone, Copy)]
struct Allocation {
    mark_submitted: bool,
    refresh_payment_code: bool,
}

/// Shared allocation routine behind submit, regenerate and the change actions.
async fn allocate<S: RegistrationStore + ?Sized>(
    store: &S,
    candidate: candidate::Model,
    policy: RetryPolicy,
    allocation: Allocation,
) -> Result<candidate::Model, ServiceError> {
    let Some(components) = resolve_components(store, &candidate).await? else {
        return Err(ServiceError::Validation(format!(
            "Candidate {} needs an assessment center, occupation, entry year and intake before a registration number can be issued",
            candidate.id
        )));
    };
    let Some(scope) = SequenceScope::of(&candidate) else {
        return Err(ServiceError::Validation(format!(
            "Candidate {} has an incomplete registration scope",
            candidate.id
        )));
    };

    let existing = store.numbers_in_scope(scope, candidate.id).await?;
    let base = identifiers::next_sequence(&existing);

    let payment_code = if allocation.refresh_payment_code || candidate.payment_code.is_none() {
        generate_payment_code(store, &candidate).await?
    } else {
        candidate.payment_code.clone()
    };

    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        let number = identifiers::format_registration_number(
            &components,
            base.saturating_add(attempt),
            policy.sequence_width,
        );

        let mut next = candidate.clone();
        next.registration_number = Some(number.clone());
        next.payment_code = payment_code.clone();
        if allocation.mark_submitted {
            next.is_submitted = true;
        }

        match store.save_identifiers(&next).await {
            Ok(saved) => {
                tracing::info!(
                    target: "services::registration",
                    candidate_id = saved.id,
                    registration_number = %number,
                    attempt = attempt + 1,
                    "registration number assigned"
                );
                return Ok(saved);
            }
            Err(e) if is_unique_violation(&e) && attempt + 1 < max_attempts => {
                tracing::warn!(
                    target: "services::registration",
                    candidate_id = candidate.id,
                    registration_number = %number,
                    attempt = attempt + 1,
                    "registration number taken, retrying"
                );
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn load_candidate<C: ConnectionTrait>(
    db: &C,
    candidate_id: i64,
) -> Result<candidate::Model, ServiceError> {
    candidate::Entity::find_by_id(candidate_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Candidate", candidate_id))
}

/// Submits a draft: issues its registration number (and payment code if it
/// has none) and marks it submitted.
pub async fn submit_with_store<S: RegistrationStore + ?Sized>(
    store: &S,
    candidate: candidate::Model,
    policy: RetryPolicy,
) -> Result<candidate::Model, ServiceError> {
    if candidate.is_submitted {
        return Err(ServiceError::Conflict(format!(
            "Candidate {} has already been submitted",
            candidate.id
        )));
    }
    allocate(
        store,
        candidate,
        policy,
        Allocation {
            mark_submitted: true,
            refresh_payment_code: false,
        },
    )
    .await
}

pub async fn submit_candidate(
    db: &DatabaseConnection,
    candidate_id: i64,
) -> Result<candidate::Model, ServiceError> {
    let candidate = load_candidate(db, candidate_id).await?;
    submit_with_store(
        &SeaOrmRegistrationStore::new(db),
        candidate,
        RetryPolicy::from_config(),
    )
    .await
}

/// Reissues the registration number from the candidate's current scope.
/// Drafts have no number to reissue.
pub async fn regenerate_registration_number(
    db: &DatabaseConnection,
    candidate_id: i64,
) -> Result<candidate::Model, ServiceError> {
    let candidate = load_candidate(db, candidate_id).await?;
    if !candidate.is_submitted {
        return Err(ServiceError::Conflict(format!(
            "Candidate {candidate_id} has not been submitted"
        )));
    }
    allocate(
        &SeaOrmRegistrationStore::new(db),
        candidate,
        RetryPolicy::from_config(),
        Allocation {
            mark_submitted: false,
            refresh_payment_code: false,
        },
    )
    .await
}

pub async fn regenerate_registration_numbers(
    db: &DatabaseConnection,
    candidate_ids: &[i64],
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &id in candidate_ids {
        outcome.record(id, regenerate_registration_number(db, id).await);
    }
    outcome
}

/// Reissues identifiers after a scope field changed. Drafts keep no number.
async fn reissue_if_submitted<C: ConnectionTrait + Send + Sync>(
    db: &C,
    candidate: candidate::Model,
    refresh_payment_code: bool,
) -> Result<candidate::Model, ServiceError> {
    if !candidate.is_submitted {
        return Ok(candidate);
    }
    allocate(
        &SeaOrmRegistrationStore::new(db),
        candidate,
        RetryPolicy::from_config(),
        Allocation {
            mark_submitted: false,
            refresh_payment_code,
        },
    )
    .await
}

pub async fn change_center(
    db: &DatabaseConnection,
    candidate_id: i64,
    assessment_center_id: i64,
    branch_id: Option<i64>,
) -> Result<candidate::Model, ServiceError> {
    let candidate = load_candidate(db, candidate_id).await?;

    assessment_center::Entity::find_by_id(assessment_center_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment center", assessment_center_id))?;

    if let Some(branch_id) = branch_id {
        let branch = center_branch::Entity::find_by_id(branch_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Branch", branch_id))?;
        if branch.assessment_center_id != assessment_center_id {
            return Err(ServiceError::Validation(format!(
                "Branch {branch_id} does not belong to assessment center {assessment_center_id}"
            )));
        }
    }

    let previous_center = candidate.assessment_center_id;
    let txn = db.begin().await?;
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        assessment_center_id: Set(Some(assessment_center_id)),
        assessment_center_branch_id: Set(branch_id),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    let updated = reissue_if_submitted(&txn, updated, true).await?;
    fees::on_center_changed(&txn, updated.id, previous_center).await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn change_occupation(
    db: &DatabaseConnection,
    candidate_id: i64,
    occupation_id: i64,
) -> Result<candidate::Model, ServiceError> {
    let candidate = load_candidate(db, candidate_id).await?;

    occupation::Entity::find_by_id(occupation_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Occupation", occupation_id))?;

    let txn = db.begin().await?;
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        occupation_id: Set(Some(occupation_id)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    let updated = reissue_if_submitted(&txn, updated, false).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Enrollments are tied to the category they were made under, so a candidate
/// must be de-enrolled before switching.
pub async fn change_category(
    db: &DatabaseConnection,
    candidate_id: i64,
    category: RegistrationCategory,
) -> Result<candidate::Model, ServiceError> {
    let candidate = load_candidate(db, candidate_id).await?;
    if candidate.registration_category == category {
        return Ok(candidate);
    }

    if enrollment::has_enrollments(db, candidate_id).await? {
        return Err(ServiceError::Conflict(format!(
            "Candidate {candidate_id} is enrolled; de-enroll before changing category"
        )));
    }

    let txn = db.begin().await?;
    let updated = candidate::ActiveModel {
        id: Set(candidate.id),
        registration_category: Set(category),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    let updated = reissue_if_submitted(&txn, updated, false).await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn change_center_bulk(
    db: &DatabaseConnection,
    candidate_ids: &[i64],
    assessment_center_id: i64,
    branch_id: Option<i64>,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &id in candidate_ids {
        outcome.record(id, change_center(db, id, assessment_center_id, branch_id).await);
    }
    outcome
}

pub async fn change_occupation_bulk(
    db: &DatabaseConnection,
    candidate_ids: &[i64],
    occupation_id: i64,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &id in candidate_ids {
        outcome.record(id, change_occupation(db, id, occupation_id).await);
    }
    outcome
}

pub async fn change_category_bulk(
    db: &DatabaseConnection,
    candidate_ids: &[i64],
    category: RegistrationCategory,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &id in candidate_ids {
        outcome.record(id, change_category(db, id, category).await);
    }
    outcome
}
