use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601100005_create_enrollments"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("candidate_enrollments"))
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
                    .col(
                        ColumnDef::new(Alias::new("occupation_level_id"))
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("total_amount"))
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("candidate_enrollments"), Alias::new("candidate_id"))
                            .to(Alias::new("candidates"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                Alias::new("candidate_enrollments"),
                                Alias::new("assessment_series_id"),
                            )
                            .to(Alias::new("assessment_series"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                Alias::new("candidate_enrollments"),
                                Alias::new("occupation_level_id"),
                            )
                            .to(Alias::new("occupation_levels"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("enrollment_modules"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("enrollment_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("module_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("enrollment_id"))
                            .col(Alias::new("module_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollment_modules"), Alias::new("enrollment_id"))
                            .to(Alias::new("candidate_enrollments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollment_modules"), Alias::new("module_id"))
                            .to(Alias::new("occupation_modules"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("enrollment_papers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("enrollment_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("paper_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("enrollment_id"))
                            .col(Alias::new("paper_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollment_papers"), Alias::new("enrollment_id"))
                            .to(Alias::new("candidate_enrollments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollment_papers"), Alias::new("paper_id"))
                            .to(Alias::new("occupation_papers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            "enrollment_papers",
            "enrollment_modules",
            "candidate_enrollments",
        ] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
