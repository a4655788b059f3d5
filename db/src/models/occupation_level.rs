use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A level of an occupation together with the fee schedule used when a
/// candidate enrolls against it. Amounts are whole Uganda shillings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "occupation_levels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub occupation_id: i64,
    pub level_name: String,
    pub formal_fee: i64,
    pub workers_pas_base_fee: i64,
    pub workers_pas_per_module_fee: i64,
    pub modular_fee_single_module: i64,
    pub modular_fee_double_module: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::occupation::Entity",
        from = "Column::OccupationId",
        to = "super::occupation::Column::Id"
    )]
    Occupation,
}

impl Related<super::occupation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Occupation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fee columns of a level, in shillings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeSchedule {
    pub formal: i64,
    pub workers_pas_base: i64,
    pub workers_pas_per_module: i64,
    pub modular_single: i64,
    pub modular_double: i64,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        occupation_id: i64,
        level_name: &str,
        fees: FeeSchedule,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            occupation_id: Set(occupation_id),
            level_name: Set(level_name.to_owned()),
            formal_fee: Set(fees.formal),
            workers_pas_base_fee: Set(fees.workers_pas_base),
            workers_pas_per_module_fee: Set(fees.workers_pas_per_module),
            modular_fee_single_module: Set(fees.modular_single),
            modular_fee_double_module: Set(fees.modular_double),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Fee for a modular enrollment sitting `module_count` modules.
    ///
    /// Only one or two modules may be taken per sitting; any other count has no fee.
    pub fn modular_fee(&self, module_count: usize) -> Option<i64> {
        match module_count {
            1 => Some(self.modular_fee_single_module),
            2 => Some(self.modular_fee_double_module),
            _ => None,
        }
    }

    /// Fee for a worker's PAS enrollment: a base amount plus a per-paper charge.
    pub fn workers_pas_fee(&self, paper_count: usize) -> i64 {
        self.workers_pas_base_fee + self.workers_pas_per_module_fee * paper_count as i64
    }
}

#[cfg(test)]
mod tests {
    use super::Model;

    fn level() -> Model {
        Model {
            id: 1,
            occupation_id: 1,
            level_name: "Level 1".into(),
            formal_fee: 150_000,
            workers_pas_base_fee: 50_000,
            workers_pas_per_module_fee: 20_000,
            modular_fee_single_module: 70_000,
            modular_fee_double_module: 130_000,
        }
    }

    #[test]
    fn modular_fee_depends_on_module_count() {
        let level = level();
        assert_eq!(level.modular_fee(1), Some(70_000));
        assert_eq!(level.modular_fee(2), Some(130_000));
        assert_eq!(level.modular_fee(0), None);
        assert_eq!(level.modular_fee(3), None);
    }

    #[test]
    fn workers_pas_fee_adds_per_paper_charge() {
        assert_eq!(level().workers_pas_fee(3), 110_000);
    }
}
