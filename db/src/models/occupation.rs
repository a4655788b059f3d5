use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A trade candidates register under. `occ_code` is embedded in the
/// registration number.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "occupations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub occ_code: String,
    pub occ_name: String,
    pub sector_id: Option<i64>,
    /// Whether candidates may register for single modules of this occupation.
    pub has_modular: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::occupation_sector::Entity",
        from = "Column::SectorId",
        to = "super::occupation_sector::Column::Id"
    )]
    Sector,
}

impl Related<super::occupation_sector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        occ_code: &str,
        occ_name: &str,
        sector_id: Option<i64>,
        has_modular: bool,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            occ_code: Set(occ_code.to_owned()),
            occ_name: Set(occ_name.to_owned()),
            sector_id: Set(sector_id),
            has_modular: Set(has_modular),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
