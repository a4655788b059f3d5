use chrono::{NaiveDate, Utc};
use db::grading::AssessmentType;
use db::models::{
    assessment_center, assessment_series,
    candidate::{self, Gender, Intake, RegistrationCategory, VerificationStatus},
    occupation, occupation_level,
    occupation_level::FeeSchedule,
    occupation_module, occupation_paper, occupation_sector,
};
use db::test_utils::setup_test_db;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};

/// Unsaved candidate with a complete registration scope: center 1,
/// occupation 1, 2025 March intake, formal.
pub fn draft_candidate(id: i64) -> candidate::Model {
    let now = Utc::now();
    candidate::Model {
        id,
        full_name: "Test Candidate".into(),
        gender: Gender::Female,
        registration_number: None,
        payment_code: None,
        registration_category: RegistrationCategory::Formal,
        assessment_center_id: Some(1),
        assessment_center_branch_id: None,
        occupation_id: Some(1),
        entry_year: Some(2025),
        intake: Some(Intake::M),
        candidate_country: None,
        nationality: None,
        is_submitted: false,
        verification_status: VerificationStatus::Pending,
        decline_reason: None,
        payment_cleared: false,
        payment_amount_cleared: None,
        payment_cleared_date: None,
        created_at: now,
        updated_at: now,
    }
}

/// Migrated database with one center (`UVT002`), one sector, one occupation
/// (`HD`) with a level, three modules, a theory and a practical paper and a current
/// series.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub center: assessment_center::Model,
    pub sector: occupation_sector::Model,
    pub occupation: occupation::Model,
    pub level: occupation_level::Model,
    pub modules: Vec<occupation_module::Model>,
    pub theory_paper: occupation_paper::Model,
    pub practical_paper: occupation_paper::Model,
    pub series: assessment_series::Model,
}

pub const FEES: FeeSchedule = FeeSchedule {
    formal: 150_000,
    workers_pas_base: 50_000,
    workers_pas_per_module: 20_000,
    modular_single: 70_000,
    modular_double: 130_000,
};

impl Fixture {
    pub async fn new() -> Self {
        let db = setup_test_db().await;
        let center = assessment_center::Model::create(&db, "UVT002", "Nakawa Vocational")
            .await
            .unwrap();
        let sector = occupation_sector::Model::create(&db, "Building").await.unwrap();
        let occupation = occupation::Model::create(&db, "HD", "Hairdressing", Some(sector.id), true)
            .await
            .unwrap();
        let level = occupation_level::Model::create(&db, occupation.id, "Level 1", FEES)
            .await
            .unwrap();
        let mut modules = Vec::new();
        for (code, name) in [("HD-M1", "Cutting"), ("HD-M2", "Styling"), ("HD-M3", "Colouring")] {
            modules.push(
                occupation_module::Model::create(&db, occupation.id, level.id, code, name)
                    .await
                    .unwrap(),
            );
        }
        let theory_paper = occupation_paper::Model::create(
            &db,
            occupation.id,
            level.id,
            "HD-T1",
            "Hair Science",
            AssessmentType::Theory,
        )
        .await
        .unwrap();
        let practical_paper = occupation_paper::Model::create(
            &db,
            occupation.id,
            level.id,
            "HD-P1",
            "Salon Practice",
            AssessmentType::Practical,
        )
        .await
        .unwrap();
        let series = assessment_series::Model::create(
            &db,
            "March 2025",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            true,
        )
        .await
        .unwrap();

        Self {
            db,
            center,
            sector,
            occupation,
            level,
            modules,
            theory_paper,
            practical_paper,
            series,
        }
    }

    pub async fn candidate(
        &self,
        name: &str,
        gender: Gender,
        category: RegistrationCategory,
    ) -> candidate::Model {
        self.candidate_in(name, gender, category, Some(self.occupation.id))
            .await
    }

    pub async fn candidate_in(
        &self,
        name: &str,
        gender: Gender,
        category: RegistrationCategory,
        occupation_id: Option<i64>,
    ) -> candidate::Model {
        let now = Utc::now();
        candidate::ActiveModel {
            full_name: Set(name.to_owned()),
            gender: Set(gender),
            registration_category: Set(category),
            assessment_center_id: Set(Some(self.center.id)),
            occupation_id: Set(occupation_id),
            entry_year: Set(Some(2025)),
            intake: Set(Some(Intake::M)),
            candidate_country: Set(Some("UG".into())),
            nationality: Set(Some("Ugandan".into())),
            is_submitted: Set(false),
            verification_status: Set(VerificationStatus::Pending),
            payment_cleared: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn formal_candidate(&self, name: &str) -> candidate::Model {
        self.candidate(name, Gender::Female, RegistrationCategory::Formal)
            .await
    }
}
