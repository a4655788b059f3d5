use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Aggregate of candidate fees for one center in one series.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "center_fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_center_id: i64,
    pub assessment_series_id: i64,
    pub total_candidates: i32,
    pub total_amount: i64,
    pub amount_paid: i64,
    pub amount_due: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessment_center::Entity",
        from = "Column::AssessmentCenterId",
        to = "super::assessment_center::Column::Id"
    )]
    AssessmentCenter,
    #[sea_orm(
        belongs_to = "super::assessment_series::Entity",
        from = "Column::AssessmentSeriesId",
        to = "super::assessment_series::Column::Id"
    )]
    Series,
}

impl Related<super::assessment_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_for<C: ConnectionTrait>(
        db: &C,
        assessment_center_id: i64,
        assessment_series_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssessmentCenterId.eq(assessment_center_id))
            .filter(Column::AssessmentSeriesId.eq(assessment_series_id))
            .one(db)
            .await
    }
}
