use crate::seed::Seeder;
use chrono::NaiveDate;
use db::grading::AssessmentType;
use db::models::{
    assessment_center, assessment_series, center_branch, occupation, occupation_level,
    occupation_level::FeeSchedule, occupation_module, occupation_paper, occupation_sector,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use services::ServiceError;

pub struct ReferenceSeeder;

const CENTERS: [(&str, &str, &[(&str, &str)]); 4] = [
    ("UVT002", "Nakawa Vocational Training Institute", &[("NK-01", "Nakawa Annex")]),
    ("UVT117", "Lira Technical Institute", &[("LT-01", "Lira North"), ("LT-02", "Lira South")]),
    ("UVT245", "Mbarara Skills Centre", &[]),
    ("UVT031", "Jinja Polytechnic", &[("JP-01", "Walukuba Campus")]),
];

/// (code, name, sector, offers modular)
const OCCUPATIONS: [(&str, &str, &str, bool); 6] = [
    ("HD", "Hairdressing", "Hospitality", true),
    ("BP", "Bakery and Pastry", "Hospitality", true),
    ("CJ", "Carpentry and Joinery", "Building", false),
    ("BCP", "Building and Concrete Practice", "Building", true),
    ("ELI", "Electrical Installation", "Engineering", false),
    ("MVM", "Motor Vehicle Mechanics", "Engineering", true),
];

const LEVELS: [(&str, FeeSchedule); 2] = [
    (
        "Level 1",
        FeeSchedule {
            formal: 150_000,
            workers_pas_base: 50_000,
            workers_pas_per_module: 20_000,
            modular_single: 70_000,
            modular_double: 130_000,
        },
    ),
    (
        "Level 2",
        FeeSchedule {
            formal: 200_000,
            workers_pas_base: 60_000,
            workers_pas_per_module: 25_000,
            modular_single: 90_000,
            modular_double: 170_000,
        },
    ),
];

#[async_trait::async_trait]
impl Seeder for ReferenceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        if assessment_center::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        for (number, name, branches) in CENTERS {
            let center = assessment_center::Model::create(db, number, name).await?;
            for (code, branch_name) in branches {
                center_branch::Model::create(db, center.id, code, branch_name).await?;
            }
        }

        let mut sectors = Vec::<occupation_sector::Model>::new();
        for (code, name, sector_name, has_modular) in OCCUPATIONS {
            let sector = match sectors.iter().find(|s| s.name == sector_name) {
                Some(s) => s.clone(),
                None => {
                    let s = occupation_sector::Model::create(db, sector_name).await?;
                    sectors.push(s.clone());
                    s
                }
            };
            let occupation =
                occupation::Model::create(db, code, name, Some(sector.id), has_modular).await?;

            for (level_name, fees) in LEVELS {
                let level =
                    occupation_level::Model::create(db, occupation.id, level_name, fees).await?;
                let tag = level_name.trim_start_matches("Level ");
                if has_modular {
                    for m in 1..=3 {
                        occupation_module::Model::create(
                            db,
                            occupation.id,
                            level.id,
                            &format!("{code}-L{tag}-M{m}"),
                            &format!("{name} module {m}"),
                        )
                        .await?;
                    }
                }
                occupation_paper::Model::create(
                    db,
                    occupation.id,
                    level.id,
                    &format!("{code}-L{tag}-T"),
                    &format!("{name} theory"),
                    AssessmentType::Theory,
                )
                .await?;
                occupation_paper::Model::create(
                    db,
                    occupation.id,
                    level.id,
                    &format!("{code}-L{tag}-P"),
                    &format!("{name} practical"),
                    AssessmentType::Practical,
                )
                .await?;
            }
        }

        assessment_series::Model::create(
            db,
            "November 2024",
            date(2024, 11, 4),
            date(2024, 11, 29),
            false,
        )
        .await?;
        assessment_series::Model::create(db, "March 2025", date(2025, 3, 3), date(2025, 3, 28), true)
            .await?;

        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
