use sea_orm::entity::prelude::*;

/// A module sat under a modular enrollment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollment_modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub enrollment_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub module_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::candidate_enrollment::Entity",
        from = "Column::EnrollmentId",
        to = "super::candidate_enrollment::Column::Id"
    )]
    Enrollment,
    #[sea_orm(
        belongs_to = "super::occupation_module::Entity",
        from = "Column::ModuleId",
        to = "super::occupation_module::Column::Id"
    )]
    Module,
}

impl Related<super::candidate_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}
