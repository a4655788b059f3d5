use crate::grading::{AssessedResult, AssessmentType};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Mark for a formal candidate. A formal mark may cover the whole level, in
/// which case there is no paper.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "formal_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub assessment_series_id: i64,
    pub paper_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub mark: Option<f64>,
    pub entered_at: DateTime<Utc>,
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
        belongs_to = "super::occupation_paper::Entity",
        from = "Column::PaperId",
        to = "super::occupation_paper::Column::Id"
    )]
    Paper,
}

impl Related<super::candidate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl AssessedResult for Model {
    fn candidate_id(&self) -> i64 {
        self.candidate_id
    }

    fn assessment_type(&self) -> AssessmentType {
        self.assessment_type
    }

    fn mark(&self) -> Option<f64> {
        self.mark
    }
}
