use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A sub-location of an assessment center.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "center_branches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_center_id: i64,
    pub branch_code: String,
    pub branch_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessment_center::Entity",
        from = "Column::AssessmentCenterId",
        to = "super::assessment_center::Column::Id"
    )]
    AssessmentCenter,
}

impl Related<super::assessment_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        assessment_center_id: i64,
        branch_code: &str,
        branch_name: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            assessment_center_id: Set(assessment_center_id),
            branch_code: Set(branch_code.to_owned()),
            branch_name: Set(branch_name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
