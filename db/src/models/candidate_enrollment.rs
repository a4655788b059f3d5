use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// A candidate's enrollment into one assessment series.
///
/// `total_amount` is fixed at enrollment time from the level's fee schedule.
/// Worker's PAS enrollments carry no level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "candidate_enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub assessment_series_id: i64,
    pub occupation_level_id: Option<i64>,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::candidate::Entity",
        from = "Column::CandidateId",
        to = "super::candidate::Column::Id"
    )]
    Candidate,
    #[sea_orm(
        belongs_to = "super::assessment_series::Entity",
        from = "Column::AssessmentSeriesId",
        to = "super::assessment_series::Column::Id"
    )]
    Series,
    #[sea_orm(
        belongs_to = "super::occupation_level::Entity",
        from = "Column::OccupationLevelId",
        to = "super::occupation_level::Column::Id"
    )]
    Level,
}

impl Related<super::candidate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidate.def()
    }
}

impl Related<super::assessment_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_for<C: ConnectionTrait>(
        db: &C,
        candidate_id: i64,
        assessment_series_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CandidateId.eq(candidate_id))
            .filter(Column::AssessmentSeriesId.eq(assessment_series_id))
            .one(db)
            .await
    }
}
