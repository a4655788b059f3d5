use crate::seed::Seeder;
use db::grading::AssessmentType;
use db::models::{
    assessment_series, candidate, candidate::RegistrationCategory, candidate_enrollment,
    enrollment_module, enrollment_paper, occupation_paper,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use services::{
    ServiceError,
    results::{self, RecordResult},
};
use std::collections::HashMap;

/// Marks for every enrollment in the current series. About one mark in
/// twelve is left missing.
pub struct ResultSeeder;

fn random_mark() -> Option<f64> {
    if fastrand::u8(..12) == 0 {
        None
    } else {
        Some(f64::from(fastrand::u8(25..=98)))
    }
}

#[async_trait::async_trait]
impl Seeder for ResultSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let Some(series) = assessment_series::Entity::find()
            .filter(assessment_series::Column::IsCurrent.eq(true))
            .one(db)
            .await?
        else {
            return Ok(());
        };

        let enrollments = candidate_enrollment::Entity::find()
            .filter(candidate_enrollment::Column::AssessmentSeriesId.eq(series.id))
            .all(db)
            .await?;
        let categories: HashMap<i64, RegistrationCategory> = candidate::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.registration_category))
            .collect();
        let papers: HashMap<i64, occupation_paper::Model> = occupation_paper::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        for enrollment in enrollments {
            let Some(&category) = categories.get(&enrollment.candidate_id) else {
                continue;
            };
            let mut marks = Vec::new();
            match category {
                RegistrationCategory::Formal => {
                    let level_papers = papers
                        .values()
                        .filter(|p| Some(p.level_id) == enrollment.occupation_level_id);
                    for paper in level_papers {
                        marks.push((None, Some(paper.id), paper.paper_type));
                    }
                }
                RegistrationCategory::Modular => {
                    let modules = enrollment_module::Entity::find()
                        .filter(enrollment_module::Column::EnrollmentId.eq(enrollment.id))
                        .all(db)
                        .await?;
                    for m in modules {
                        marks.push((Some(m.module_id), None, AssessmentType::Practical));
                    }
                }
                RegistrationCategory::WorkersPas => {
                    let enrolled = enrollment_paper::Entity::find()
                        .filter(enrollment_paper::Column::EnrollmentId.eq(enrollment.id))
                        .all(db)
                        .await?;
                    for ep in enrolled {
                        if let Some(paper) = papers.get(&ep.paper_id) {
                            marks.push((None, Some(paper.id), paper.paper_type));
                        }
                    }
                }
            }

            for (module_id, paper_id, assessment_type) in marks {
                results::record_result(
                    db,
                    RecordResult {
                        candidate_id: enrollment.candidate_id,
                        assessment_series_id: series.id,
                        module_id,
                        paper_id,
                        assessment_type,
                        mark: random_mark(),
                    },
                )
                .await?;
            }
        }

        Ok(())
    }
}
