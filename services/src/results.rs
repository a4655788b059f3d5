use chrono::Utc;
use db::grading::{AssessedResult, AssessmentType, ResultComment};
use db::models::{
    candidate,
    candidate::RegistrationCategory,
    candidate_enrollment, enrollment_module, enrollment_paper, formal_result, modular_result,
    occupation_paper, workers_pas_result,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordResult {
    pub candidate_id: i64,
    pub assessment_series_id: i64,
    pub module_id: Option<i64>,
    pub paper_id: Option<i64>,
    pub assessment_type: AssessmentType,
    /// `None` or a negative value records a missing mark.
    pub mark: Option<f64>,
}

/// A stored mark with its derived grade and comment.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultRow {
    pub id: i64,
    pub category: RegistrationCategory,
    pub module_id: Option<i64>,
    pub paper_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub mark: Option<f64>,
    pub grade: &'static str,
    pub comment: ResultComment,
}

impl ResultRow {
    fn new<R: AssessedResult>(
        result: &R,
        id: i64,
        category: RegistrationCategory,
        module_id: Option<i64>,
        paper_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            category,
            module_id,
            paper_id,
            assessment_type: result.assessment_type(),
            mark: result.mark(),
            grade: result.grade(),
            comment: result.comment(),
        }
    }
}

impl From<&modular_result::Model> for ResultRow {
    fn from(r: &modular_result::Model) -> Self {
        ResultRow::new(r, r.id, RegistrationCategory::Modular, Some(r.module_id), None)
    }
}

impl From<&formal_result::Model> for ResultRow {
    fn from(r: &formal_result::Model) -> Self {
        ResultRow::new(r, r.id, RegistrationCategory::Formal, None, r.paper_id)
    }
}

impl From<&workers_pas_result::Model> for ResultRow {
    fn from(r: &workers_pas_result::Model) -> Self {
        ResultRow::new(r, r.id, RegistrationCategory::WorkersPas, None, Some(r.paper_id))
    }
}

fn validate_mark(mark: Option<f64>) -> Result<Option<f64>, ServiceError> {
    match mark {
        Some(m) if m.is_nan() || m > 100.0 => Err(ServiceError::Validation(format!(
            "Mark {m} is outside 0 to 100"
        ))),
        other => Ok(other),
    }
}

/// A mark may only land on a module or paper the enrollment actually covers.
/// Formal enrollments sit the papers of their level.
async fn ensure_assessed_in(
    db: &DatabaseConnection,
    enrollment: &candidate_enrollment::Model,
    category: RegistrationCategory,
    params: &RecordResult,
) -> Result<(), ServiceError> {
    match category {
        RegistrationCategory::Modular => {
            let Some(module_id) = params.module_id else {
                return Ok(());
            };
            let sat = enrollment_module::Entity::find()
                .filter(enrollment_module::Column::EnrollmentId.eq(enrollment.id))
                .filter(enrollment_module::Column::ModuleId.eq(module_id))
                .count(db)
                .await?;
            if sat == 0 {
                return Err(ServiceError::Validation(format!(
                    "Module {module_id} is not part of enrollment {}",
                    enrollment.id
                )));
            }
        }
        RegistrationCategory::WorkersPas => {
            let Some(paper_id) = params.paper_id else {
                return Ok(());
            };
            let sat = enrollment_paper::Entity::find()
                .filter(enrollment_paper::Column::EnrollmentId.eq(enrollment.id))
                .filter(enrollment_paper::Column::PaperId.eq(paper_id))
                .count(db)
                .await?;
            if sat == 0 {
                return Err(ServiceError::Validation(format!(
                    "Paper {paper_id} is not part of enrollment {}",
                    enrollment.id
                )));
            }
        }
        RegistrationCategory::Formal => {
            let Some(paper_id) = params.paper_id else {
                return Ok(());
            };
            let paper = occupation_paper::Entity::find_by_id(paper_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Paper", paper_id))?;
            if enrollment.occupation_level_id != Some(paper.level_id) {
                return Err(ServiceError::Validation(format!(
                    "Paper {paper_id} does not belong to the level of enrollment {}",
                    enrollment.id
                )));
            }
        }
    }
    Ok(())
}

/// Inserts or replaces the mark for one (candidate, series, module or paper,
/// assessment type). The table is chosen by the candidate's category.
pub async fn record_result(
    db: &DatabaseConnection,
    params: RecordResult,
) -> Result<ResultRow, ServiceError> {
    let candidate = candidate::Entity::find_by_id(params.candidate_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Candidate", params.candidate_id))?;

    let Some(enrollment) =
        candidate_enrollment::Model::find_for(db, candidate.id, params.assessment_series_id)
            .await?
    else {
        return Err(ServiceError::Validation(format!(
            "Candidate {} is not enrolled in series {}",
            candidate.id, params.assessment_series_id
        )));
    };
    ensure_assessed_in(db, &enrollment, candidate.registration_category, &params).await?;

    let mark = validate_mark(params.mark)?;
    let now = Utc::now();

    let row = match candidate.registration_category {
        RegistrationCategory::Modular => {
            let module_id = params.module_id.ok_or_else(|| {
                ServiceError::Validation("Modular results are recorded against a module".into())
            })?;
            let existing = modular_result::Entity::find()
                .filter(modular_result::Column::CandidateId.eq(candidate.id))
                .filter(modular_result::Column::AssessmentSeriesId.eq(params.assessment_series_id))
                .filter(modular_result::Column::ModuleId.eq(module_id))
                .filter(modular_result::Column::AssessmentType.eq(params.assessment_type))
                .one(db)
                .await?;
            let saved = match existing {
                Some(row) => {
                    let mut active = row.into_active_model();
                    active.mark = Set(mark);
                    active.entered_at = Set(now);
                    active.update(db).await?
                }
                None => {
                    modular_result::ActiveModel {
                        candidate_id: Set(candidate.id),
                        assessment_series_id: Set(params.assessment_series_id),
                        module_id: Set(module_id),
                        assessment_type: Set(params.assessment_type),
                        mark: Set(mark),
                        entered_at: Set(now),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?
                }
            };
            ResultRow::from(&saved)
        }
        RegistrationCategory::Formal => {
            let mut query = formal_result::Entity::find()
                .filter(formal_result::Column::CandidateId.eq(candidate.id))
                .filter(formal_result::Column::AssessmentSeriesId.eq(params.assessment_series_id))
                .filter(formal_result::Column::AssessmentType.eq(params.assessment_type));
            query = match params.paper_id {
                Some(paper_id) => query.filter(formal_result::Column::PaperId.eq(paper_id)),
                None => query.filter(formal_result::Column::PaperId.is_null()),
            };
            let saved = match query.one(db).await? {
                Some(row) => {
                    let mut active = row.into_active_model();
                    active.mark = Set(mark);
                    active.entered_at = Set(now);
                    active.update(db).await?
                }
                None => {
                    formal_result::ActiveModel {
                        candidate_id: Set(candidate.id),
                        assessment_series_id: Set(params.assessment_series_id),
                        paper_id: Set(params.paper_id),
                        assessment_type: Set(params.assessment_type),
                        mark: Set(mark),
                        entered_at: Set(now),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?
                }
            };
            ResultRow::from(&saved)
        }
        RegistrationCategory::WorkersPas => {
            let paper_id = params.paper_id.ok_or_else(|| {
                ServiceError::Validation("Worker's PAS results are recorded against a paper".into())
            })?;
            let existing = workers_pas_result::Entity::find()
                .filter(workers_pas_result::Column::CandidateId.eq(candidate.id))
                .filter(
                    workers_pas_result::Column::AssessmentSeriesId.eq(params.assessment_series_id),
                )
                .filter(workers_pas_result::Column::PaperId.eq(paper_id))
                .filter(workers_pas_result::Column::AssessmentType.eq(params.assessment_type))
                .one(db)
                .await?;
            let saved = match existing {
                Some(row) => {
                    let mut active = row.into_active_model();
                    active.mark = Set(mark);
                    active.entered_at = Set(now);
                    active.update(db).await?
                }
                None => {
                    workers_pas_result::ActiveModel {
                        candidate_id: Set(candidate.id),
                        assessment_series_id: Set(params.assessment_series_id),
                        paper_id: Set(paper_id),
                        assessment_type: Set(params.assessment_type),
                        mark: Set(mark),
                        entered_at: Set(now),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?
                }
            };
            ResultRow::from(&saved)
        }
    };

    tracing::debug!(
        target: "services::results",
        candidate_id = candidate.id,
        series_id = params.assessment_series_id,
        grade = row.grade,
        "result recorded"
    );
    Ok(row)
}

/// Every mark a candidate holds in a series, across all three result tables.
pub async fn candidate_results(
    db: &DatabaseConnection,
    candidate_id: i64,
    series_id: i64,
) -> Result<Vec<ResultRow>, ServiceError> {
    candidate::Entity::find_by_id(candidate_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Candidate", candidate_id))?;

    let mut rows: Vec<ResultRow> = Vec::new();
    rows.extend(
        modular_result::Entity::find()
            .filter(modular_result::Column::CandidateId.eq(candidate_id))
            .filter(modular_result::Column::AssessmentSeriesId.eq(series_id))
            .order_by_asc(modular_result::Column::Id)
            .all(db)
            .await?
            .iter()
            .map(ResultRow::from),
    );
    rows.extend(
        formal_result::Entity::find()
            .filter(formal_result::Column::CandidateId.eq(candidate_id))
            .filter(formal_result::Column::AssessmentSeriesId.eq(series_id))
            .order_by_asc(formal_result::Column::Id)
            .all(db)
            .await?
            .iter()
            .map(ResultRow::from),
    );
    rows.extend(
        workers_pas_result::Entity::find()
            .filter(workers_pas_result::Column::CandidateId.eq(candidate_id))
            .filter(workers_pas_result::Column::AssessmentSeriesId.eq(series_id))
            .order_by_asc(workers_pas_result::Column::Id)
            .all(db)
            .await?
            .iter()
            .map(ResultRow::from),
    );
    Ok(rows)
}
