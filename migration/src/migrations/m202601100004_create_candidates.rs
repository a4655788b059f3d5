use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601100004_create_candidates"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("candidates"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("full_name")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("gender"))
                            .string()
                            .not_null()
                            .default("other"),
                    )
                    // NULL until submission; SQLite allows many NULLs under a unique index.
                    .col(
                        ColumnDef::new(Alias::new("registration_number"))
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("payment_code"))
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("registration_category"))
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("assessment_center_id"))
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("assessment_center_branch_id"))
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("occupation_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("entry_year")).integer().null())
                    .col(ColumnDef::new(Alias::new("intake")).string().null())
                    .col(ColumnDef::new(Alias::new("candidate_country")).string().null())
                    .col(ColumnDef::new(Alias::new("nationality")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("is_submitted"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alias::new("verification_status"))
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Alias::new("decline_reason")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("payment_cleared"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alias::new("payment_amount_cleared"))
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("payment_cleared_date"))
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("candidates"), Alias::new("assessment_center_id"))
                            .to(Alias::new("assessment_centers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                Alias::new("candidates"),
                                Alias::new("assessment_center_branch_id"),
                            )
                            .to(Alias::new("center_branches"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("candidates"), Alias::new("occupation_id"))
                            .to(Alias::new("occupations"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the sequence scan for registration numbers.
        manager
            .create_index(
                Index::create()
                    .name("idx_candidates_registration_scope")
                    .table(Alias::new("candidates"))
                    .col(Alias::new("assessment_center_id"))
                    .col(Alias::new("occupation_id"))
                    .col(Alias::new("entry_year"))
                    .col(Alias::new("intake"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("candidates")).to_owned())
            .await
    }
}
