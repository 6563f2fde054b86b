//! Create log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Log::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Log::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Log::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Log::Title).string_len(20).not_null())
                    .col(ColumnDef::new(Log::Description).string_len(60).not_null())
                    .col(
                        ColumnDef::new(Log::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Log::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_user")
                            .from(Log::Table, Log::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, title) - one title per owner
        manager
            .create_index(
                Index::create()
                    .name("idx_log_user_title")
                    .table(Log::Table)
                    .col(Log::UserId)
                    .col(Log::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for feeds)
        manager
            .create_index(
                Index::create()
                    .name("idx_log_created_at")
                    .table(Log::Table)
                    .col(Log::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Log::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Log {
    Table,
    Id,
    UserId,
    Title,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
