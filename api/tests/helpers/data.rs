use chrono::NaiveDate;
use db::grading::AssessmentType;
use db::models::{
    assessment_center, assessment_series, center_branch, occupation, occupation_level,
    occupation_level::FeeSchedule, occupation_module, occupation_paper, occupation_sector,
};
use sea_orm::DatabaseConnection;

pub const FEES: FeeSchedule = FeeSchedule {
    formal: 150_000,
    workers_pas_base: 50_000,
    workers_pas_per_module: 20_000,
    modular_single: 70_000,
    modular_double: 130_000,
};

/// Reference data the route tests build candidates against.
pub struct TestData {
    pub center: assessment_center::Model,
    pub other_center: assessment_center::Model,
    pub branch: center_branch::Model,
    pub occupation: occupation::Model,
    pub level: occupation_level::Model,
    pub modules: Vec<occupation_module::Model>,
    pub paper: occupation_paper::Model,
    pub series: assessment_series::Model,
}

impl TestData {
    pub async fn seed(db: &DatabaseConnection) -> Self {
        let center = assessment_center::Model::create(db, "UVT002", "Nakawa Vocational")
            .await
            .expect("Failed to create center");
        let other_center = assessment_center::Model::create(db, "UVT117", "Lira Technical")
            .await
            .expect("Failed to create second center");
        let branch = center_branch::Model::create(db, other_center.id, "LT-01", "Lira Annex")
            .await
            .expect("Failed to create branch");
        let sector = occupation_sector::Model::create(db, "Building")
            .await
            .expect("Failed to create sector");
        let occupation = occupation::Model::create(db, "HD", "Hairdressing", Some(sector.id), true)
            .await
            .expect("Failed to create occupation");
        let level = occupation_level::Model::create(db, occupation.id, "Level 1", FEES)
            .await
            .expect("Failed to create level");
        let mut modules = Vec::new();
        for (code, name) in [("HD-M1", "Cutting"), ("HD-M2", "Styling")] {
            modules.push(
                occupation_module::Model::create(db, occupation.id, level.id, code, name)
                    .await
                    .expect("Failed to create module"),
            );
        }
        let paper = occupation_paper::Model::create(
            db,
            occupation.id,
            level.id,
            "HD-T1",
            "Hair Science",
            AssessmentType::Theory,
        )
        .await
        .expect("Failed to create paper");
        let series = assessment_series::Model::create(
            db,
            "March 2025",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            true,
        )
        .await
        .expect("Failed to create series");

        Self {
            center,
            other_center,
            branch,
            occupation,
            level,
            modules,
            paper,
            series,
        }
    }

    /// JSON body for a Ugandan March 2025 draft at the main center.
    pub fn candidate_body(&self, name: &str, gender: &str, category: &str) -> serde_json::Value {
        serde_json::json!({
            "full_name": name,
            "gender": gender,
            "registration_category": category,
            "assessment_center_id": self.center.id,
            "occupation_id": self.occupation.id,
            "entry_year": 2025,
            "intake": "M",
            "candidate_country": "UG"
        })
    }
}
