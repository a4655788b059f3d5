use sea_orm::entity::prelude::*;

/// A paper sat under a worker's PAS enrollment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollment_papers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub enrollment_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub paper_id: i64,
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
        belongs_to = "super::occupation_paper::Entity",
        from = "Column::PaperId",
        to = "super::occupation_paper::Column::Id"
    )]
    Paper,
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
