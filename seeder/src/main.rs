use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    candidate::CandidateSeeder, enrollment::EnrollmentSeeder, fee::FeeSeeder,
    reference::ReferenceSeeder, result::ResultSeeder,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(ReferenceSeeder) as Box<dyn Seeder + Send + Sync>, "Reference data"),
        (Box::new(CandidateSeeder { count: 60 }), "Candidate"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
        (Box::new(ResultSeeder), "Result"),
        (Box::new(FeeSeeder), "Fee"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
