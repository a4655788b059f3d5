use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use db::models::{
    assessment_series, candidate,
    candidate::RegistrationCategory,
    candidate_enrollment, enrollment_module, enrollment_paper, occupation, occupation_level,
    occupation_module, occupation_paper,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::error::{BulkOutcome, ServiceError};
use crate::fees;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrollCandidate {
    pub candidate_id: i64,
    pub assessment_series_id: i64,
    pub occupation_level_id: Option<i64>,
    #[serde(default)]
    pub module_ids: Vec<i64>,
    #[serde(default)]
    pub paper_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct Enrollment {
    pub enrollment: candidate_enrollment::Model,
    pub module_ids: Vec<i64>,
    pub paper_ids: Vec<i64>,
}

const MAX_MODULES_PER_SITTING: usize = 2;

fn distinct(ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
    let set: BTreeSet<i64> = ids.iter().copied().collect();
    if set.len() != ids.len() {
        return Err(ServiceError::Validation("Duplicate ids in enrollment".into()));
    }
    Ok(set.into_iter().collect())
}

async fn load_level<C: ConnectionTrait>(
    conn: &C,
    level_id: Option<i64>,
    occupation_id: i64,
    category: RegistrationCategory,
) -> Result<occupation_level::Model, ServiceError> {
    let Some(level_id) = level_id else {
        return Err(ServiceError::Validation(format!(
            "An occupation level is required for {category} enrollment"
        )));
    };
    let level = occupation_level::Entity::find_by_id(level_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Occupation level", level_id))?;
    if level.occupation_id != occupation_id {
        return Err(ServiceError::Validation(format!(
            "Level {level_id} does not belong to the candidate's occupation"
        )));
    }
    Ok(level)
}

/// Validates the request against the candidate's category and returns the
/// enrollment fee.
async fn enrollment_total<C: ConnectionTrait>(
    conn: &C,
    candidate: &candidate::Model,
    params: &EnrollCandidate,
) -> Result<i64, ServiceError> {
    let occupation_id = candidate.occupation_id.ok_or_else(|| {
        ServiceError::Validation(format!("Candidate {} has no occupation", candidate.id))
    })?;
    let category = candidate.registration_category;

    match category {
        RegistrationCategory::Formal => {
            if !params.module_ids.is_empty() || !params.paper_ids.is_empty() {
                return Err(ServiceError::Validation(
                    "Formal enrollment covers the whole level; do not list modules or papers"
                        .into(),
                ));
            }
            let level = load_level(conn, params.occupation_level_id, occupation_id, category).await?;
            Ok(level.formal_fee)
        }
        RegistrationCategory::Modular => {
            let occupation = occupation::Entity::find_by_id(occupation_id)
                .one(conn)
                .await?
                .ok_or_else(|| ServiceError::not_found("Occupation", occupation_id))?;
            if !occupation.has_modular {
                return Err(ServiceError::Validation(format!(
                    "Occupation {} does not offer modular assessment",
                    occupation.occ_code
                )));
            }
            if !params.paper_ids.is_empty() {
                return Err(ServiceError::Validation(
                    "Modular enrollment takes modules, not papers".into(),
                ));
            }
            let module_ids = distinct(&params.module_ids)?;
            if module_ids.is_empty() || module_ids.len() > MAX_MODULES_PER_SITTING {
                return Err(ServiceError::Validation(format!(
                    "Modular enrollment takes 1 to {MAX_MODULES_PER_SITTING} modules, got {}",
                    module_ids.len()
                )));
            }
            let level = load_level(conn, params.occupation_level_id, occupation_id, category).await?;

            let modules = occupation_module::Entity::find()
                .filter(occupation_module::Column::Id.is_in(module_ids.clone()))
                .all(conn)
                .await?;
            if modules.len() != module_ids.len() {
                return Err(ServiceError::Validation("Unknown module in enrollment".into()));
            }
            if let Some(stray) = modules.iter().find(|m| m.level_id != level.id) {
                return Err(ServiceError::Validation(format!(
                    "Module {} is not part of level {}",
                    stray.module_code, level.level_name
                )));
            }
            level.modular_fee(module_ids.len()).ok_or_else(|| {
                ServiceError::Validation("No modular fee for this number of modules".into())
            })
        }
        RegistrationCategory::WorkersPas => {
            if params.occupation_level_id.is_some() {
                return Err(ServiceError::Validation(
                    "Worker's PAS enrollment is not tied to a level".into(),
                ));
            }
            if !params.module_ids.is_empty() {
                return Err(ServiceError::Validation(
                    "Worker's PAS enrollment takes papers, not modules".into(),
                ));
            }
            let paper_ids = distinct(&params.paper_ids)?;
            if paper_ids.is_empty() {
                return Err(ServiceError::Validation(
                    "Worker's PAS enrollment needs at least one paper".into(),
                ));
            }
            let papers = occupation_paper::Entity::find()
                .filter(occupation_paper::Column::Id.is_in(paper_ids.clone()))
                .all(conn)
                .await?;
            if papers.len() != paper_ids.len() {
                return Err(ServiceError::Validation("Unknown paper in enrollment".into()));
            }
            if let Some(stray) = papers.iter().find(|p| p.occupation_id != occupation_id) {
                return Err(ServiceError::Validation(format!(
                    "Paper {} is not part of the candidate's occupation",
                    stray.paper_code
                )));
            }

            // Papers may span levels; each level charges its own base fee.
            let mut per_level: BTreeMap<i64, usize> = BTreeMap::new();
            for paper in &papers {
                *per_level.entry(paper.level_id).or_default() += 1;
            }
            let levels = occupation_level::Entity::find()
                .filter(occupation_level::Column::Id.is_in(per_level.keys().copied()))
                .all(conn)
                .await?;
            Ok(levels
                .iter()
                .map(|level| level.workers_pas_fee(per_level.get(&level.id).copied().unwrap_or(0)))
                .sum())
        }
    }
}

pub async fn has_enrollments<C: ConnectionTrait>(conn: &C, candidate_id: i64) -> Result<bool, DbErr> {
    let count = candidate_enrollment::Entity::find()
        .filter(candidate_enrollment::Column::CandidateId.eq(candidate_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn enroll_candidate(
    db: &DatabaseConnection,
    params: EnrollCandidate,
) -> Result<Enrollment, ServiceError> {
    let candidate = candidate::Entity::find_by_id(params.candidate_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Candidate", params.candidate_id))?;
    assessment_series::Entity::find_by_id(params.assessment_series_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment series", params.assessment_series_id))?;

    if candidate_enrollment::Model::find_for(db, candidate.id, params.assessment_series_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "Candidate {} is already enrolled in series {}",
            candidate.id, params.assessment_series_id
        )));
    }

    let total_amount = enrollment_total(db, &candidate, &params).await?;

    let txn = db.begin().await?;
    let enrollment = candidate_enrollment::ActiveModel {
        candidate_id: Set(candidate.id),
        assessment_series_id: Set(params.assessment_series_id),
        occupation_level_id: Set(params.occupation_level_id),
        total_amount: Set(total_amount),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if !params.module_ids.is_empty() {
        enrollment_module::Entity::insert_many(params.module_ids.iter().map(|&module_id| {
            enrollment_module::ActiveModel {
                enrollment_id: Set(enrollment.id),
                module_id: Set(module_id),
            }
        }))
        .exec(&txn)
        .await?;
    }
    if !params.paper_ids.is_empty() {
        enrollment_paper::Entity::insert_many(params.paper_ids.iter().map(|&paper_id| {
            enrollment_paper::ActiveModel {
                enrollment_id: Set(enrollment.id),
                paper_id: Set(paper_id),
            }
        }))
        .exec(&txn)
        .await?;
    }

    fees::sync_for_enrollment(&txn, candidate.id, params.assessment_series_id).await?;
    txn.commit().await?;

    tracing::info!(
        target: "services::enrollment",
        candidate_id = candidate.id,
        series_id = params.assessment_series_id,
        total_amount,
        "candidate enrolled"
    );

    Ok(Enrollment {
        enrollment,
        module_ids: params.module_ids,
        paper_ids: params.paper_ids,
    })
}

pub async fn deenroll_candidate(
    db: &DatabaseConnection,
    candidate_id: i64,
    series_id: i64,
) -> Result<(), ServiceError> {
    let enrollment_ids: Vec<i64> = candidate_enrollment::Entity::find()
        .filter(candidate_enrollment::Column::CandidateId.eq(candidate_id))
        .filter(candidate_enrollment::Column::AssessmentSeriesId.eq(series_id))
        .all(db)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    if enrollment_ids.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "Candidate {candidate_id} is not enrolled in series {series_id}"
        )));
    }

    let txn = db.begin().await?;
    enrollment_module::Entity::delete_many()
        .filter(enrollment_module::Column::EnrollmentId.is_in(enrollment_ids.clone()))
        .exec(&txn)
        .await?;
    enrollment_paper::Entity::delete_many()
        .filter(enrollment_paper::Column::EnrollmentId.is_in(enrollment_ids.clone()))
        .exec(&txn)
        .await?;
    candidate_enrollment::Entity::delete_many()
        .filter(candidate_enrollment::Column::Id.is_in(enrollment_ids))
        .exec(&txn)
        .await?;
    fees::sync_for_enrollment(&txn, candidate_id, series_id).await?;
    txn.commit().await?;

    tracing::info!(
        target: "services::enrollment",
        candidate_id,
        series_id,
        "candidate de-enrolled"
    );
    Ok(())
}

pub async fn enroll_bulk(db: &DatabaseConnection, requests: Vec<EnrollCandidate>) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for request in requests {
        let id = request.candidate_id;
        outcome.record(id, enroll_candidate(db, request).await);
    }
    outcome
}

pub async fn deenroll_bulk(
    db: &DatabaseConnection,
    series_id: i64,
    candidate_ids: &[i64],
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &id in candidate_ids {
        outcome.record(id, deenroll_candidate(db, id, series_id).await);
    }
    outcome
}
