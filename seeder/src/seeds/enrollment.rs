use crate::seed::Seeder;
use db::models::{
    assessment_series, candidate, candidate::RegistrationCategory, candidate_enrollment,
    occupation_level, occupation_module, occupation_paper,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use services::{
    ServiceError,
    enrollment::{self, EnrollCandidate},
};

/// Enrolls every submitted candidate into the current series with a
/// selection that fits its registration category.
pub struct EnrollmentSeeder;

fn pick<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[fastrand::usize(..items.len())])
    }
}

#[async_trait::async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let Some(series) = assessment_series::Entity::find()
            .filter(assessment_series::Column::IsCurrent.eq(true))
            .one(db)
            .await?
        else {
            return Ok(());
        };
        if candidate_enrollment::Entity::find()
            .filter(candidate_enrollment::Column::AssessmentSeriesId.eq(series.id))
            .count(db)
            .await?
            > 0
        {
            return Ok(());
        }

        let candidates = candidate::Entity::find()
            .filter(candidate::Column::IsSubmitted.eq(true))
            .all(db)
            .await?;
        let levels = occupation_level::Entity::find().all(db).await?;
        let modules = occupation_module::Entity::find().all(db).await?;
        let papers = occupation_paper::Entity::find().all(db).await?;

        let mut requests = Vec::new();
        for c in &candidates {
            let Some(occupation_id) = c.occupation_id else {
                continue;
            };
            let own_levels: Vec<_> = levels
                .iter()
                .filter(|l| l.occupation_id == occupation_id)
                .collect();
            let Some(level) = pick(&own_levels) else {
                continue;
            };

            let mut request = EnrollCandidate {
                candidate_id: c.id,
                assessment_series_id: series.id,
                occupation_level_id: None,
                module_ids: Vec::new(),
                paper_ids: Vec::new(),
            };
            match c.registration_category {
                RegistrationCategory::Formal => {
                    request.occupation_level_id = Some(level.id);
                }
                RegistrationCategory::Modular => {
                    request.occupation_level_id = Some(level.id);
                    let mut level_modules: Vec<i64> = modules
                        .iter()
                        .filter(|m| m.level_id == level.id)
                        .map(|m| m.id)
                        .collect();
                    fastrand::shuffle(&mut level_modules);
                    level_modules.truncate(fastrand::usize(1..=2));
                    request.module_ids = level_modules;
                }
                RegistrationCategory::WorkersPas => {
                    let mut own_papers: Vec<i64> = papers
                        .iter()
                        .filter(|p| p.occupation_id == occupation_id)
                        .map(|p| p.id)
                        .collect();
                    fastrand::shuffle(&mut own_papers);
                    own_papers.truncate(fastrand::usize(1..=3));
                    request.paper_ids = own_papers;
                }
            }
            requests.push(request);
        }

        // Candidates whose selection is rejected stay unenrolled.
        let outcome = enrollment::enroll_bulk(db, requests).await;
        if !outcome.failed.is_empty() {
            println!();
            for failure in &outcome.failed {
                println!("  skipped candidate {}: {}", failure.id, failure.error);
            }
        }
        Ok(())
    }
}
