use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "occupation_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub occupation_id: i64,
    pub level_id: i64,
    #[sea_orm(unique)]
    pub module_code: String,
    pub module_name: String,
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
        module_code: &str,
        module_name: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            occupation_id: Set(occupation_id),
            level_id: Set(level_id),
            module_code: Set(module_code.to_owned()),
            module_name: Set(module_name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
