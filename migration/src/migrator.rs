use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601100001_create_assessment_centers::Migration),
            Box::new(migrations::m202601100002_create_occupations::Migration),
            Box::new(migrations::m202601100003_create_assessment_series::Migration),
            Box::new(migrations::m202601100004_create_candidates::Migration),
            Box::new(migrations::m202601100005_create_enrollments::Migration),
            Box::new(migrations::m202601100006_create_fees::Migration),
            Box::new(migrations::m202601100007_create_results::Migration),
        ]
    }
}
