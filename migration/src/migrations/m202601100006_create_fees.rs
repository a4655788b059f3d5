use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601100006_create_fees"
    }
}

fn money(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .big_integer()
        .not_null()
        .default(0)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("candidate_fees"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("candidate_id")).integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("assessment_series_id"))
                            .integer()
                            .not_null(),
                    )
                    .col(money("total_amount"))
                    .col(money("amount_paid"))
                    .col(money("amount_due"))
                    .col(
                        ColumnDef::new(Alias::new("payment_status"))
                            .string()
                            .not_null()
                            .default("not_paid"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .index(
                        Index::create()
                            .col(Alias::new("candidate_id"))
                            .col(Alias::new("assessment_series_id"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("candidate_fees"), Alias::new("candidate_id"))
                            .to(Alias::new("candidates"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("candidate_fees"), Alias::new("assessment_series_id"))
                            .to(Alias::new("assessment_series"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("center_fees"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("assessment_center_id"))
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("assessment_series_id"))
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("total_candidates"))
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(money("total_amount"))
                    .col(money("amount_paid"))
                    .col(money("amount_due"))
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .index(
                        Index::create()
                            .col(Alias::new("assessment_center_id"))
                            .col(Alias::new("assessment_series_id"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("center_fees"), Alias::new("assessment_center_id"))
                            .to(Alias::new("assessment_centers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("center_fees"), Alias::new("assessment_series_id"))
                            .to(Alias::new("assessment_series"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("center_fees")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("candidate_fees")).to_owned())
            .await
    }
}
