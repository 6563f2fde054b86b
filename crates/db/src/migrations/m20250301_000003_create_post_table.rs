//! Create post table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::LogId).string_len(32).not_null())
                    .col(ColumnDef::new(Post::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Post::Title).string_len(20).not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_log")
                            .from(Post::Table, Post::LogId)
                            .to(Log::Table, Log::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_user")
                            .from(Post::Table, Post::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, title) - one title per author
        manager
            .create_index(
                Index::create()
                    .name("idx_post_user_title")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .col(Post::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: log_id (for listing a log's posts)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_log_id")
                    .table(Post::Table)
                    .col(Post::LogId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
    LogId,
    UserId,
    Title,
    Content,
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
