use crate::seed::Seeder;
use db::models::candidate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use services::{ServiceError, candidates, fees};

/// Clears payment for a share of verified candidates, then rebuilds every
/// fee ledger from scratch.
pub struct FeeSeeder;

#[async_trait::async_trait]
impl Seeder for FeeSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let submitted = candidate::Entity::find()
            .filter(candidate::Column::IsSubmitted.eq(true))
            .filter(candidate::Column::PaymentCleared.eq(false))
            .all(db)
            .await?;

        for c in submitted {
            match fastrand::u8(..4) {
                0 => {
                    candidates::verify_candidate(db, c.id).await?;
                    candidates::clear_payment(db, c.id, None, None).await?;
                }
                1 => {
                    candidates::verify_candidate(db, c.id).await?;
                    let partial = i64::from(fastrand::u8(1..=10)) * 10_000;
                    candidates::clear_payment(db, c.id, Some(partial), None).await?;
                }
                _ => {}
            }
        }

        fees::populate_fees(db, None).await?;
        Ok(())
    }
}
