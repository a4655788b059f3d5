use crate::seed::Seeder;
use db::models::{
    assessment_center, candidate,
    candidate::{Gender, Intake, RegistrationCategory},
    center_branch, occupation,
};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use services::{
    ServiceError,
    candidates::{self, CreateCandidate},
    registration,
};

/// Random candidates spread over every center and occupation. Roughly four
/// in five are submitted so they carry registration numbers.
pub struct CandidateSeeder {
    pub count: usize,
}

const COUNTRIES: [&str; 5] = ["UG", "UG", "UG", "KE", "SS"];

#[async_trait::async_trait]
impl Seeder for CandidateSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        if candidate::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let centers = assessment_center::Entity::find().all(db).await?;
        let branches = center_branch::Entity::find().all(db).await?;
        let occupations = occupation::Entity::find().all(db).await?;
        if centers.is_empty() || occupations.is_empty() {
            return Ok(());
        }

        for _ in 0..self.count {
            let center = &centers[fastrand::usize(..centers.len())];
            let occupation = &occupations[fastrand::usize(..occupations.len())];
            let branch = branches
                .iter()
                .filter(|b| b.assessment_center_id == center.id)
                .find(|_| fastrand::bool());

            let category = match fastrand::u8(..10) {
                0..=5 => RegistrationCategory::Formal,
                6..=7 if occupation.has_modular => RegistrationCategory::Modular,
                _ => RegistrationCategory::WorkersPas,
            };
            let gender = match fastrand::u8(..20) {
                0 => Gender::Other,
                1..=10 => Gender::Female,
                _ => Gender::Male,
            };
            let intake = [Intake::M, Intake::J, Intake::S, Intake::D, Intake::A]
                [fastrand::usize(..5)];

            let first: String = FirstName().fake();
            let last: String = LastName().fake();

            let created = candidates::create_candidate(
                db,
                CreateCandidate {
                    full_name: format!("{first} {last}"),
                    gender,
                    registration_category: category,
                    assessment_center_id: Some(center.id),
                    assessment_center_branch_id: branch.map(|b| b.id),
                    occupation_id: Some(occupation.id),
                    entry_year: Some(fastrand::i32(2023..=2025)),
                    intake: Some(intake),
                    candidate_country: Some(COUNTRIES[fastrand::usize(..COUNTRIES.len())].into()),
                    nationality: None,
                },
            )
            .await?;

            if fastrand::u8(..5) > 0 {
                registration::submit_candidate(db, created.id).await?;
            }
        }

        Ok(())
    }
}
