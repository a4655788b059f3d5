//! Pass/fail/missing statistics for an assessment series.
//!
//! Every candidate enrolled in the series (optionally restricted to some
//! centers) is classified once and fed into the overview, category, sector
//! and occupation buckets. The row order of each list is part of the output
//! contract: report exporters render it as-is.

pub mod aggregator;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use db::grading::AssessedResult;
use db::models::{
    assessment_series, candidate,
    candidate::{Gender, RegistrationCategory},
    candidate_enrollment, formal_result, modular_result, occupation, occupation_sector,
    workers_pas_result,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;
use thiserror::Error;

pub use aggregator::{AggregateStats, GenderCount, StatisticsAggregator};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNSPECIFIED_OCCUPATION: &str = "Unspecified";
pub const TOTAL_LABEL: &str = "Total";
pub const GRAND_TOTAL_LABEL: &str = "GRAND TOTAL";

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("Assessment series {0} not found")]
    SeriesNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_missing: bool,
    pub is_sat: bool,
    pub is_passed: bool,
}

/// Result rows seen for one candidate.
#[derive(Debug, Clone, Copy, Default)]
struct ResultTally {
    rows: usize,
    failing: usize,
}

impl ResultTally {
    fn add(&mut self, result: &dyn AssessedResult) {
        self.rows += 1;
        if !result.is_passing() {
            self.failing += 1;
        }
    }

    /// Sat means any row exists, even one with a missing mark. Passed needs
    /// every row to clear its own threshold.
    fn classification(&self) -> Classification {
        let is_sat = self.rows > 0;
        Classification {
            is_missing: !is_sat,
            is_sat,
            is_passed: is_sat && self.failing == 0,
        }
    }
}

pub fn classify(results: &[&dyn AssessedResult]) -> Classification {
    let mut tally = ResultTally::default();
    for result in results {
        tally.add(*result);
    }
    tally.classification()
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    #[serde(flatten)]
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorRow {
    pub sector: String,
    #[serde(flatten)]
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupationRowKind {
    Occupation,
    SectorTotal,
    GrandTotal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OccupationRow {
    pub kind: OccupationRowKind,
    pub sector: Option<String>,
    pub occupation_code: Option<String>,
    pub occupation: String,
    #[serde(flatten)]
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CentersBySector {
    pub sector: String,
    pub centers: usize,
    pub branches: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CentersSummary {
    pub total_centers: usize,
    pub total_branches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesStatistics {
    pub series: SeriesSummary,
    pub center_ids: Vec<i64>,
    pub overview: AggregateStats,
    pub category_stats: Vec<CategoryRow>,
    pub sector_stats: Vec<SectorRow>,
    pub occupation_stats: Vec<OccupationRow>,
    pub centers_by_sector: Vec<CentersBySector>,
    pub centers_by_sector_summary: CentersSummary,
    pub grade_distribution: BTreeMap<String, GenderCount>,
}

fn tally_rows<R: AssessedResult>(
    rows: &[R],
    genders: &HashMap<i64, Gender>,
    tallies: &mut HashMap<i64, ResultTally>,
    grades: &mut BTreeMap<String, GenderCount>,
) {
    for row in rows {
        let Some(&gender) = genders.get(&row.candidate_id()) else {
            continue;
        };
        tallies.entry(row.candidate_id()).or_default().add(row);
        grades.entry(row.grade().to_owned()).or_default().record(gender);
    }
}

#[derive(Default)]
struct CenterSets {
    centers: BTreeSet<i64>,
    branches: BTreeSet<i64>,
}

pub async fn calculate_series_statistics(
    db: &DatabaseConnection,
    series_id: i64,
    center_ids: &[i64],
) -> Result<SeriesStatistics, StatisticsError> {
    let series = assessment_series::Entity::find_by_id(series_id)
        .one(db)
        .await?
        .ok_or(StatisticsError::SeriesNotFound(series_id))?;

    let mut query = candidate::Entity::find()
        .join(
            JoinType::InnerJoin,
            candidate_enrollment::Relation::Candidate.def().rev(),
        )
        .filter(candidate_enrollment::Column::AssessmentSeriesId.eq(series_id));
    if !center_ids.is_empty() {
        query = query.filter(candidate::Column::AssessmentCenterId.is_in(center_ids.to_vec()));
    }

    // Duplicate enrollments must not count a candidate twice.
    let mut seen = HashSet::new();
    let candidates: Vec<candidate::Model> = query
        .order_by_asc(candidate::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter(|c| seen.insert(c.id))
        .collect();

    let genders: HashMap<i64, Gender> = candidates.iter().map(|c| (c.id, c.gender)).collect();

    let occupations: HashMap<i64, occupation::Model> = occupation::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|o| (o.id, o))
        .collect();
    let sectors: HashMap<i64, String> = occupation_sector::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let mut tallies: HashMap<i64, ResultTally> = HashMap::new();
    let mut grade_distribution: BTreeMap<String, GenderCount> = BTreeMap::new();
    tally_rows(
        &modular_result::Entity::find()
            .filter(modular_result::Column::AssessmentSeriesId.eq(series_id))
            .all(db)
            .await?,
        &genders,
        &mut tallies,
        &mut grade_distribution,
    );
    tally_rows(
        &formal_result::Entity::find()
            .filter(formal_result::Column::AssessmentSeriesId.eq(series_id))
            .all(db)
            .await?,
        &genders,
        &mut tallies,
        &mut grade_distribution,
    );
    tally_rows(
        &workers_pas_result::Entity::find()
            .filter(workers_pas_result::Column::AssessmentSeriesId.eq(series_id))
            .all(db)
            .await?,
        &genders,
        &mut tallies,
        &mut grade_distribution,
    );

    let mut overview = StatisticsAggregator::new();
    let mut by_category: BTreeMap<RegistrationCategory, StatisticsAggregator> = BTreeMap::new();
    let mut by_sector: BTreeMap<String, StatisticsAggregator> = BTreeMap::new();
    let mut by_occupation: BTreeMap<String, BTreeMap<(String, Option<String>), StatisticsAggregator>> =
        BTreeMap::new();
    let mut centers_by_sector: BTreeMap<String, CenterSets> = BTreeMap::new();
    let mut all_centers = CenterSets::default();

    for candidate in &candidates {
        let c = tallies
            .get(&candidate.id)
            .copied()
            .unwrap_or_default()
            .classification();
        let gender = candidate.gender;

        overview.update(gender, c.is_missing, c.is_sat, c.is_passed);
        by_category
            .entry(candidate.registration_category)
            .or_default()
            .update(gender, c.is_missing, c.is_sat, c.is_passed);

        let occupation = candidate.occupation_id.and_then(|id| occupations.get(&id));
        let sector = occupation
            .and_then(|o| o.sector_id)
            .and_then(|id| sectors.get(&id))
            .cloned()
            .unwrap_or_else(|| UNCATEGORIZED.to_owned());

        by_sector
            .entry(sector.clone())
            .or_default()
            .update(gender, c.is_missing, c.is_sat, c.is_passed);

        let occupation_key = match occupation {
            Some(o) => (o.occ_name.clone(), Some(o.occ_code.clone())),
            None => (UNSPECIFIED_OCCUPATION.to_owned(), None),
        };
        by_occupation
            .entry(sector.clone())
            .or_default()
            .entry(occupation_key)
            .or_default()
            .update(gender, c.is_missing, c.is_sat, c.is_passed);

        let sets = centers_by_sector.entry(sector).or_default();
        if let Some(center_id) = candidate.assessment_center_id {
            sets.centers.insert(center_id);
            all_centers.centers.insert(center_id);
        }
        if let Some(branch_id) = candidate.assessment_center_branch_id {
            sets.branches.insert(branch_id);
            all_centers.branches.insert(branch_id);
        }
    }

    let overview_stats = overview.stats();

    let mut category_stats: Vec<CategoryRow> = by_category
        .iter()
        .map(|(category, agg)| CategoryRow {
            category: category.to_string(),
            stats: agg.stats(),
        })
        .collect();
    category_stats.push(CategoryRow {
        category: TOTAL_LABEL.to_owned(),
        stats: overview_stats,
    });

    let mut sector_stats: Vec<SectorRow> = by_sector
        .iter()
        .map(|(sector, agg)| SectorRow {
            sector: sector.clone(),
            stats: agg.stats(),
        })
        .collect();
    sector_stats.push(SectorRow {
        sector: TOTAL_LABEL.to_owned(),
        stats: overview_stats,
    });

    let mut occupation_stats = Vec::new();
    for (sector, occupations) in &by_occupation {
        for ((name, code), agg) in occupations {
            occupation_stats.push(OccupationRow {
                kind: OccupationRowKind::Occupation,
                sector: Some(sector.clone()),
                occupation_code: code.clone(),
                occupation: name.clone(),
                stats: agg.stats(),
            });
        }
        let sector_total = by_sector.get(sector).copied().unwrap_or_default();
        occupation_stats.push(OccupationRow {
            kind: OccupationRowKind::SectorTotal,
            sector: Some(sector.clone()),
            occupation_code: None,
            occupation: format!("{sector} - TOTAL"),
            stats: sector_total.stats(),
        });
    }
    occupation_stats.push(OccupationRow {
        kind: OccupationRowKind::GrandTotal,
        sector: None,
        occupation_code: None,
        occupation: GRAND_TOTAL_LABEL.to_owned(),
        stats: overview_stats,
    });

    let centers_by_sector = centers_by_sector
        .into_iter()
        .map(|(sector, sets)| CentersBySector {
            sector,
            centers: sets.centers.len(),
            branches: sets.branches.len(),
        })
        .collect();

    tracing::debug!(
        target: "services::statistics",
        series_id,
        candidates = candidates.len(),
        "series statistics computed"
    );

    Ok(SeriesStatistics {
        series: SeriesSummary {
            id: series.id,
            name: series.name,
        },
        center_ids: center_ids.to_vec(),
        overview: overview_stats,
        category_stats,
        sector_stats,
        occupation_stats,
        centers_by_sector,
        centers_by_sector_summary: CentersSummary {
            total_centers: all_centers.centers.len(),
            total_branches: all_centers.branches.len(),
        },
        grade_distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{RecordResult, record_result};
    use crate::test_support::Fixture;
    use chrono::Utc;
    use db::grading::AssessmentType;
    use db::models::{assessment_center, center_branch};
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    async fn enroll_raw(fx: &Fixture, candidate_id: i64) {
        candidate_enrollment::ActiveModel {
            candidate_id: Set(candidate_id),
            assessment_series_id: Set(fx.series.id),
            occupation_level_id: Set(None),
            total_amount: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&fx.db)
        .await
        .unwrap();
    }

    async fn mark(fx: &Fixture, candidate_id: i64, t: AssessmentType, m: f64) {
        record_result(
            &fx.db,
            RecordResult {
                candidate_id,
                assessment_series_id: fx.series.id,
                module_id: None,
                paper_id: None,
                assessment_type: t,
                mark: Some(m),
            },
        )
        .await
        .unwrap();
    }

    fn formal_row(t: AssessmentType, m: Option<f64>) -> formal_result::Model {
        formal_result::Model {
            id: 1,
            candidate_id: 1,
            assessment_series_id: 1,
            paper_id: None,
            assessment_type: t,
            mark: m,
            entered_at: Utc::now(),
        }
    }

    #[test]
    fn one_failing_component_fails_the_candidate() {
        let practical = modular_result::Model {
            id: 1,
            candidate_id: 1,
            assessment_series_id: 1,
            module_id: 1,
            assessment_type: AssessmentType::Practical,
            mark: Some(70.0),
            entered_at: Utc::now(),
        };
        let theory = formal_row(AssessmentType::Theory, Some(40.0));

        let c = classify(&[&practical, &theory]);
        assert!(c.is_sat);
        assert!(!c.is_missing);
        assert!(!c.is_passed);
    }

    #[test]
    fn missing_mark_row_still_counts_as_sat() {
        let row = formal_row(AssessmentType::Theory, None);
        let c = classify(&[&row]);
        assert!(c.is_sat);
        assert!(!c.is_passed);
    }

    #[test]
    fn no_rows_is_missing() {
        let c = classify(&[]);
        assert_eq!(
            c,
            Classification {
                is_missing: true,
                is_sat: false,
                is_passed: false
            }
        );
    }

    #[tokio::test]
    async fn unknown_series_is_not_found() {
        let fx = Fixture::new().await;
        let err = calculate_series_statistics(&fx.db, 9_999, &[]).await.unwrap_err();
        assert!(matches!(err, StatisticsError::SeriesNotFound(9_999)));
    }

    #[tokio::test]
    async fn empty_series_has_only_total_rows() {
        let fx = Fixture::new().await;
        let stats = calculate_series_statistics(&fx.db, fx.series.id, &[]).await.unwrap();
        assert_eq!(stats.overview.total_enrolled, 0);
        assert_eq!(stats.overview.pass_rate, 0.0);
        assert_eq!(stats.category_stats.len(), 1);
        assert_eq!(stats.category_stats[0].category, TOTAL_LABEL);
        assert_eq!(stats.occupation_stats.len(), 1);
        assert_eq!(stats.occupation_stats[0].occupation, GRAND_TOTAL_LABEL);
    }

    #[tokio::test]
    async fn overview_and_breakdowns() {
        let fx = Fixture::new().await;
        let failed = fx.formal_candidate("Split").await;
        let passed = fx.candidate("Pass", Gender::Male, RegistrationCategory::Formal).await;
        let absent = fx.formal_candidate("Absent").await;
        for c in [&failed, &passed, &absent] {
            enroll_raw(&fx, c.id).await;
        }
        // A duplicate enrollment must not double count.
        enroll_raw(&fx, failed.id).await;

        mark(&fx, failed.id, AssessmentType::Practical, 70.0).await;
        mark(&fx, failed.id, AssessmentType::Theory, 40.0).await;
        mark(&fx, passed.id, AssessmentType::Practical, 80.0).await;

        let stats = calculate_series_statistics(&fx.db, fx.series.id, &[]).await.unwrap();
        let o = stats.overview;
        assert_eq!(o.total_enrolled, 3);
        assert_eq!((o.male_enrolled, o.female_enrolled), (1, 2));
        assert_eq!(o.total_sat, 2);
        assert_eq!(o.total_missing, 1);
        assert_eq!(o.female_missing, 1);
        assert_eq!(o.total_passed, 1);
        assert_eq!(o.male_passed, 1);
        assert_eq!(o.total_failed, 1);
        assert_eq!(o.pass_rate, 50.0);
        assert_eq!(o.missing_rate, 33.33);

        let categories: Vec<&str> = stats.category_stats.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["formal", "Total"]);
        assert_eq!(stats.category_stats[1].stats, o);

        let sectors: Vec<&str> = stats.sector_stats.iter().map(|r| r.sector.as_str()).collect();
        assert_eq!(sectors, vec!["Building", "Total"]);

        assert_eq!(stats.grade_distribution["B-"], GenderCount { total: 1, male: 0, female: 1 });
        assert_eq!(stats.grade_distribution["D"], GenderCount { total: 1, male: 0, female: 1 });
        assert_eq!(stats.grade_distribution["B"], GenderCount { total: 1, male: 1, female: 0 });
    }

    #[tokio::test]
    async fn occupation_rows_roll_up_by_sector() {
        let fx = Fixture::new().await;
        let agriculture = occupation_sector::Model::create(&fx.db, "Agriculture").await.unwrap();
        let poultry = occupation::Model::create(&fx.db, "PF", "Poultry Farming", Some(agriculture.id), false)
            .await
            .unwrap();
        let crops = occupation::Model::create(&fx.db, "CP", "Crop Production", Some(agriculture.id), false)
            .await
            .unwrap();
        let bricks = occupation::Model::create(&fx.db, "BL", "Bricklaying", Some(fx.sector.id), false)
            .await
            .unwrap();

        for occupation_id in [poultry.id, crops.id, bricks.id, fx.occupation.id] {
            let c = fx
                .candidate_in("C", Gender::Female, RegistrationCategory::Formal, Some(occupation_id))
                .await;
            enroll_raw(&fx, c.id).await;
        }

        let stats = calculate_series_statistics(&fx.db, fx.series.id, &[]).await.unwrap();
        let labels: Vec<&str> = stats
            .occupation_stats
            .iter()
            .map(|r| r.occupation.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Crop Production",
                "Poultry Farming",
                "Agriculture - TOTAL",
                "Bricklaying",
                "Hairdressing",
                "Building - TOTAL",
                "GRAND TOTAL",
            ]
        );
        assert_eq!(stats.occupation_stats[2].stats.total_enrolled, 2);
        assert_eq!(stats.occupation_stats[2].kind, OccupationRowKind::SectorTotal);
        assert_eq!(stats.occupation_stats[6].stats.total_enrolled, 4);
        assert_eq!(
            stats
                .occupation_stats
                .iter()
                .filter(|r| r.kind == OccupationRowKind::GrandTotal)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn candidates_without_occupation_are_uncategorized() {
        let fx = Fixture::new().await;
        let c = fx
            .candidate_in("Loose", Gender::Male, RegistrationCategory::WorkersPas, None)
            .await;
        enroll_raw(&fx, c.id).await;

        let stats = calculate_series_statistics(&fx.db, fx.series.id, &[]).await.unwrap();
        assert_eq!(stats.sector_stats[0].sector, UNCATEGORIZED);
        assert_eq!(stats.occupation_stats[0].occupation, UNSPECIFIED_OCCUPATION);
        assert_eq!(
            stats.occupation_stats[1].occupation,
            format!("{UNCATEGORIZED} - TOTAL")
        );
    }

    #[tokio::test]
    async fn centers_are_counted_distinctly_and_filterable() {
        let fx = Fixture::new().await;
        let branch = center_branch::Model::create(&fx.db, fx.center.id, "B01", "Jinja")
            .await
            .unwrap();
        for name in ["A", "B", "C"] {
            let c = fx.formal_candidate(name).await;
            candidate::ActiveModel {
                id: Set(c.id),
                assessment_center_branch_id: Set(Some(branch.id)),
                ..Default::default()
            }
            .update(&fx.db)
            .await
            .unwrap();
            enroll_raw(&fx, c.id).await;
        }

        let stats = calculate_series_statistics(&fx.db, fx.series.id, &[]).await.unwrap();
        assert_eq!(
            stats.centers_by_sector,
            vec![CentersBySector {
                sector: "Building".into(),
                centers: 1,
                branches: 1
            }]
        );
        assert_eq!(
            stats.centers_by_sector_summary,
            CentersSummary {
                total_centers: 1,
                total_branches: 1
            }
        );

        let elsewhere = assessment_center::Model::create(&fx.db, "UVT099", "Elsewhere")
            .await
            .unwrap();
        let filtered = calculate_series_statistics(&fx.db, fx.series.id, &[elsewhere.id])
            .await
            .unwrap();
        assert_eq!(filtered.overview.total_enrolled, 0);
        assert_eq!(filtered.center_ids, vec![elsewhere.id]);
    }
}
