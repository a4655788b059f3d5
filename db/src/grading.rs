//! Mark-to-grade lookup shared by the three result tables.
//!
//! Nothing here is persisted: grade, comment and pass/fail are derived from
//! the stored mark every time they are read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Grade reported for a missing mark.
pub const MISSING_GRADE: &str = "Ms";

const THEORY_GRADES: [(f64, &str); 6] = [
    (85.0, "A"),
    (80.0, "B+"),
    (70.0, "B"),
    (60.0, "B-"),
    (50.0, "C"),
    (40.0, "D"),
];

const PRACTICAL_GRADES: [(f64, &str); 6] = [
    (90.0, "A"),
    (85.0, "B+"),
    (75.0, "B"),
    (65.0, "B-"),
    (60.0, "C"),
    (50.0, "D"),
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AssessmentType {
    #[sea_orm(string_value = "theory")]
    Theory,
    #[sea_orm(string_value = "practical")]
    Practical,
}

impl AssessmentType {
    pub fn passing_threshold(self) -> f64 {
        match self {
            AssessmentType::Theory => 50.0,
            AssessmentType::Practical => 65.0,
        }
    }

    fn grade_table(self) -> &'static [(f64, &'static str)] {
        match self {
            AssessmentType::Theory => &THEORY_GRADES,
            AssessmentType::Practical => &PRACTICAL_GRADES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ResultComment {
    Successful,
    #[strum(serialize = "Not Successful")]
    #[serde(rename = "Not Successful")]
    NotSuccessful,
    Missing,
}

/// Null and negative marks both mean "no mark recorded".
pub fn recorded_mark(mark: Option<f64>) -> Option<f64> {
    mark.filter(|m| *m >= 0.0)
}

pub fn grade_for(assessment_type: AssessmentType, mark: Option<f64>) -> &'static str {
    let Some(mark) = recorded_mark(mark) else {
        return MISSING_GRADE;
    };
    assessment_type
        .grade_table()
        .iter()
        .find(|(floor, _)| mark >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or("E")
}

/// A stored mark for one assessment component.
///
/// Implemented by every result table so callers can classify rows without
/// knowing which table they came from.
pub trait AssessedResult {
    fn candidate_id(&self) -> i64;
    fn assessment_type(&self) -> AssessmentType;
    fn mark(&self) -> Option<f64>;

    fn passing_threshold(&self) -> f64 {
        self.assessment_type().passing_threshold()
    }

    fn is_missing(&self) -> bool {
        recorded_mark(self.mark()).is_none()
    }

    fn is_passing(&self) -> bool {
        recorded_mark(self.mark()).is_some_and(|m| m >= self.passing_threshold())
    }

    fn grade(&self) -> &'static str {
        grade_for(self.assessment_type(), self.mark())
    }

    fn comment(&self) -> ResultComment {
        if self.is_missing() {
            ResultComment::Missing
        } else if self.is_passing() {
            ResultComment::Successful
        } else {
            ResultComment::NotSuccessful
        }
    }
}
