use crate::grading::AssessmentType;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "occupation_papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub occupation_id: i64,
    pub level_id: i64,
    #[sea_orm(unique)]
    pub paper_code: String,
    pub paper_name: String,
    pub paper_type: AssessmentType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::occupation::Entity",
        from = "Column::OccupationId",
        to = "super::occupation::Column::Id"
    )]
    Occupation,
    #[sea_orm(
        belongs_to = "super::occupation_level::Entity",
        from = "Column::LevelId",
        to = "super::occupation_level::Column::Id"
    )]
    Level,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        occupation_id: i64,
        level_id: i64,
        paper_code: &str,
        paper_name: &str,
        paper_type: AssessmentType,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            occupation_id: Set(occupation_id),
            level_id: Set(level_id),
            paper_code: Set(paper_code.to_owned()),
            paper_name: Set(paper_name.to_owned()),
            paper_type: Set(paper_type),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
