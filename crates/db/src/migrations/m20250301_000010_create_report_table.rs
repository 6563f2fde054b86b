//! Create report table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::LogId).string_len(32).not_null())
                    .col(ColumnDef::new(Report::ReporterId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Report::ReportedUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Report::Reason).string_len(60).not_null())
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_log")
                            .from(Report::Table, Report::LogId)
                            .to(Log::Table, Log::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_reporter")
                            .from(Report::Table, Report::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_reported_user")
                            .from(Report::Table, Report::ReportedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (log_id, reporter_id, reported_user_id) - one report
        // per triple, closes the check-then-insert race
        manager
            .create_index(
                Index::create()
                    .name("idx_report_log_reporter_reported")
                    .table(Report::Table)
                    .col(Report::LogId)
                    .col(Report::ReporterId)
                    .col(Report::ReportedUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: reported_user_id (suspension deletes a user's reports)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_reported_user_id")
                    .table(Report::Table)
                    .col(Report::ReportedUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
    LogId,
    ReporterId,
    ReportedUserId,
    Reason,
    CreatedAt,
}

#[derive(Iden)]
enum Log {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
