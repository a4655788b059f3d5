//! Fee ledgers derived from enrollments and payment clearance.
//!
//! `candidate_fees` and `center_fees` are never adjusted in place. Every
//! write path that touches an enrollment, a candidate's center or a payment
//! calls one of the `on_*` hooks here, which recompute the affected rows from
//! source data inside a transaction.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use db::models::{
    candidate, candidate_enrollment,
    candidate_fee::{self, PaymentStatus},
    center_fee,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;

/// Amount of a cleared payment credited to `series_id`.
///
/// A cleared amount is spread over the candidate's series in id order; with
/// no amount recorded, clearance covers every series in full.
fn credited_amount(
    candidate: &candidate::Model,
    totals_by_series: &[(i64, i64)],
    series_id: i64,
) -> i64 {
    if !candidate.payment_cleared {
        return 0;
    }
    let total = totals_by_series
        .iter()
        .filter(|(s, _)| *s == series_id)
        .map(|(_, t)| *t)
        .sum::<i64>();
    let Some(cleared) = candidate.payment_amount_cleared else {
        return total;
    };
    let earlier: i64 = totals_by_series
        .iter()
        .filter(|(s, _)| *s < series_id)
        .map(|(_, t)| *t)
        .sum();
    (cleared - earlier).clamp(0, total)
}

/// Recomputes the fee row for one candidate in one series. The row is removed
/// when no enrollment remains.
pub async fn sync_candidate_fee<C: ConnectionTrait>(
    conn: &C,
    candidate_id: i64,
    series_id: i64,
) -> Result<Option<candidate_fee::Model>, DbErr> {
    let existing = candidate_fee::Model::find_for(conn, candidate_id, series_id).await?;

    let Some(candidate) = candidate::Entity::find_by_id(candidate_id).one(conn).await? else {
        if let Some(row) = existing {
            candidate_fee::Entity::delete_by_id(row.id).exec(conn).await?;
        }
        return Ok(None);
    };

    let totals: Vec<(i64, i64)> = candidate_enrollment::Entity::find()
        .select_only()
        .column(candidate_enrollment::Column::AssessmentSeriesId)
        .column(candidate_enrollment::Column::TotalAmount)
        .filter(candidate_enrollment::Column::CandidateId.eq(candidate_id))
        .order_by_asc(candidate_enrollment::Column::AssessmentSeriesId)
        .into_tuple()
        .all(conn)
        .await?;

    if !totals.iter().any(|(s, _)| *s == series_id) {
        if let Some(row) = existing {
            candidate_fee::Entity::delete_by_id(row.id).exec(conn).await?;
        }
        return Ok(None);
    }

    let total_amount: i64 = totals
        .iter()
        .filter(|(s, _)| *s == series_id)
        .map(|(_, t)| *t)
        .sum();
    let amount_paid = credited_amount(&candidate, &totals, series_id);
    let amount_due = (total_amount - amount_paid).max(0);
    let payment_status = PaymentStatus::from_amounts(total_amount, amount_paid);

    let saved = match existing {
        Some(row) => {
            let mut active = row.into_active_model();
            active.total_amount = Set(total_amount);
            active.amount_paid = Set(amount_paid);
            active.amount_due = Set(amount_due);
            active.payment_status = Set(payment_status);
            active.updated_at = Set(Utc::now());
            active.update(conn).await?
        }
        None => {
            candidate_fee::ActiveModel {
                candidate_id: Set(candidate_id),
                assessment_series_id: Set(series_id),
                total_amount: Set(total_amount),
                amount_paid: Set(amount_paid),
                amount_due: Set(amount_due),
                payment_status: Set(payment_status),
                updated_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(conn)
            .await?
        }
    };
    Ok(Some(saved))
}

/// Recomputes the center aggregate from the candidate fee rows of every
/// candidate currently registered at the center.
pub async fn sync_center_fee<C: ConnectionTrait>(
    conn: &C,
    center_id: i64,
    series_id: i64,
) -> Result<Option<center_fee::Model>, DbErr> {
    let rows = candidate_fee::Entity::find()
        .inner_join(candidate::Entity)
        .filter(candidate::Column::AssessmentCenterId.eq(center_id))
        .filter(candidate_fee::Column::AssessmentSeriesId.eq(series_id))
        .all(conn)
        .await?;

    let existing = center_fee::Model::find_for(conn, center_id, series_id).await?;

    if rows.is_empty() {
        if let Some(row) = existing {
            center_fee::Entity::delete_by_id(row.id).exec(conn).await?;
        }
        return Ok(None);
    }

    let total_candidates = rows.len() as i32;
    let total_amount: i64 = rows.iter().map(|r| r.total_amount).sum();
    let amount_paid: i64 = rows.iter().map(|r| r.amount_paid).sum();
    let amount_due: i64 = rows.iter().map(|r| r.amount_due).sum();

    let saved = match existing {
        Some(row) => {
            let mut active = row.into_active_model();
            active.total_candidates = Set(total_candidates);
            active.total_amount = Set(total_amount);
            active.amount_paid = Set(amount_paid);
            active.amount_due = Set(amount_due);
            active.updated_at = Set(Utc::now());
            active.update(conn).await?
        }
        None => {
            center_fee::ActiveModel {
                assessment_center_id: Set(center_id),
                assessment_series_id: Set(series_id),
                total_candidates: Set(total_candidates),
                total_amount: Set(total_amount),
                amount_paid: Set(amount_paid),
                amount_due: Set(amount_due),
                updated_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(conn)
            .await?
        }
    };
    Ok(Some(saved))
}

/// Candidate row first, then the center aggregate that includes it.
pub(crate) async fn sync_for_enrollment<C: ConnectionTrait>(
    conn: &C,
    candidate_id: i64,
    series_id: i64,
) -> Result<(), DbErr> {
    sync_candidate_fee(conn, candidate_id, series_id).await?;
    let center_id = candidate::Entity::find_by_id(candidate_id)
        .one(conn)
        .await?
        .and_then(|c| c.assessment_center_id);
    if let Some(center_id) = center_id {
        sync_center_fee(conn, center_id, series_id).await?;
    }
    Ok(())
}

pub async fn on_enrollment_changed(
    db: &DatabaseConnection,
    candidate_id: i64,
    series_id: i64,
) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    sync_for_enrollment(&txn, candidate_id, series_id).await?;
    txn.commit().await
}

async fn enrolled_series<C: ConnectionTrait>(conn: &C, candidate_id: i64) -> Result<Vec<i64>, DbErr> {
    let series: Vec<i64> = candidate_enrollment::Entity::find()
        .select_only()
        .column(candidate_enrollment::Column::AssessmentSeriesId)
        .filter(candidate_enrollment::Column::CandidateId.eq(candidate_id))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(series.into_iter().collect::<BTreeSet<_>>().into_iter().collect())
}

/// Payment clearance changed: every series the candidate sits is affected.
pub async fn on_payment_changed(db: &DatabaseConnection, candidate_id: i64) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    for series_id in enrolled_series(&txn, candidate_id).await? {
        sync_for_enrollment(&txn, candidate_id, series_id).await?;
    }
    txn.commit().await
}

/// The candidate moved centers: refresh both the old and new center totals.
/// Runs on the caller's transaction so the move and the ledgers commit together.
pub async fn on_center_changed<C: ConnectionTrait>(
    conn: &C,
    candidate_id: i64,
    previous_center_id: Option<i64>,
) -> Result<(), DbErr> {
    for series_id in enrolled_series(conn, candidate_id).await? {
        sync_for_enrollment(conn, candidate_id, series_id).await?;
        if let Some(previous) = previous_center_id {
            sync_center_fee(conn, previous, series_id).await?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PopulateSummary {
    pub candidate_fees: usize,
    pub center_fees: usize,
}

/// Rebuilds every fee row for `series_id` (or for all series) from scratch.
pub async fn populate_fees(
    db: &DatabaseConnection,
    series_id: Option<i64>,
) -> Result<PopulateSummary, DbErr> {
    let txn = db.begin().await?;

    let mut clear_candidates = candidate_fee::Entity::delete_many();
    let mut clear_centers = center_fee::Entity::delete_many();
    let mut enrollments = candidate_enrollment::Entity::find()
        .select_only()
        .column(candidate_enrollment::Column::CandidateId)
        .column(candidate_enrollment::Column::AssessmentSeriesId);
    if let Some(series_id) = series_id {
        clear_candidates =
            clear_candidates.filter(candidate_fee::Column::AssessmentSeriesId.eq(series_id));
        clear_centers = clear_centers.filter(center_fee::Column::AssessmentSeriesId.eq(series_id));
        enrollments =
            enrollments.filter(candidate_enrollment::Column::AssessmentSeriesId.eq(series_id));
    }
    clear_candidates.exec(&txn).await?;
    clear_centers.exec(&txn).await?;

    let pairs: BTreeSet<(i64, i64)> = enrollments
        .into_tuple::<(i64, i64)>()
        .all(&txn)
        .await?
        .into_iter()
        .collect();

    let centers: HashMap<i64, Option<i64>> = candidate::Entity::find()
        .select_only()
        .column(candidate::Column::Id)
        .column(candidate::Column::AssessmentCenterId)
        .into_tuple::<(i64, Option<i64>)>()
        .all(&txn)
        .await?
        .into_iter()
        .collect();

    let mut summary = PopulateSummary::default();
    let mut center_pairs = BTreeSet::new();
    for &(candidate_id, series_id) in &pairs {
        if sync_candidate_fee(&txn, candidate_id, series_id).await?.is_some() {
            summary.candidate_fees += 1;
        }
        if let Some(Some(center_id)) = centers.get(&candidate_id) {
            center_pairs.insert((*center_id, series_id));
        }
    }
    for (center_id, series_id) in center_pairs {
        if sync_center_fee(&txn, center_id, series_id).await?.is_some() {
            summary.center_fees += 1;
        }
    }

    txn.commit().await?;
    tracing::info!(
        target: "services::fees",
        series_id = ?series_id,
        candidate_fees = summary.candidate_fees,
        center_fees = summary.center_fees,
        "fee ledgers rebuilt"
    );
    Ok(summary)
}
