//! Create log_tag association table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LogTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LogTag::LogId).string_len(32).not_null())
                    .col(ColumnDef::new(LogTag::TagId).string_len(32).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_log_tag")
                            .col(LogTag::LogId)
                            .col(LogTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_tag_log")
                            .from(LogTag::Table, LogTag::LogId)
                            .to(Log::Table, Log::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_log_tag_tag")
                            .from(LogTag::Table, LogTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: tag_id (for finding logs by tag)
        manager
            .create_index(
                Index::create()
                    .name("idx_log_tag_tag_id")
                    .table(LogTag::Table)
                    .col(LogTag::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogTag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LogTag {
    Table,
    LogId,
    TagId,
}

#[derive(Iden)]
enum Log {
    Table,
    Id,
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
}
