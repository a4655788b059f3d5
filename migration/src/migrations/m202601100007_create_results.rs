use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601100007_create_results"
    }
}

/// Shared shape of the three result tables: they only differ in which
/// catalogue row (module or paper) a mark is recorded against.
fn result_table(
    table: &str,
    subject_column: &str,
    subject_table: &str,
    subject_nullable: bool,
) -> TableCreateStatement {
    let mut subject = ColumnDef::new(Alias::new(subject_column));
    subject.integer();
    if subject_nullable {
        subject.null();
    } else {
        subject.not_null();
    }

    Table::create()
        .table(Alias::new(table))
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
        .col(subject)
        .col(
            ColumnDef::new(Alias::new("assessment_type"))
                .string()
                .not_null()
                .default("practical"),
        )
        .col(ColumnDef::new(Alias::new("mark")).double().null())
        .col(
            ColumnDef::new(Alias::new("entered_at"))
                .timestamp()
                .not_null()
                .default(Expr::cust("CURRENT_TIMESTAMP")),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new("candidate_id"))
                .to(Alias::new("candidates"), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new("assessment_series_id"))
                .to(Alias::new("assessment_series"), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new(subject_column))
                .to(Alias::new(subject_table), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .index(
            Index::create()
                .col(Alias::new("candidate_id"))
                .col(Alias::new("assessment_series_id"))
                .col(Alias::new(subject_column))
                .col(Alias::new("assessment_type"))
                .unique(),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(result_table(
                "modular_results",
                "module_id",
                "occupation_modules",
                false,
            ))
            .await?;
        manager
            .create_table(result_table(
                "formal_results",
                "paper_id",
                "occupation_papers",
                true,
            ))
            .await?;
        manager
            .create_table(result_table(
                "workers_pas_results",
                "paper_id",
                "occupation_papers",
                false,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ["workers_pas_results", "formal_results", "modular_results"] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
