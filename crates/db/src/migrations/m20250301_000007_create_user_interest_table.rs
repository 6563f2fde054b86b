//! Create user_interest association table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserInterest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserInterest::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserInterest::TagId)
                            .string_len(32)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_user_interest")
                            .col(UserInterest::UserId)
                            .col(UserInterest::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_interest_user")
                            .from(UserInterest::Table, UserInterest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_interest_tag")
                            .from(UserInterest::Table, UserInterest::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: tag_id (for finding users by interest)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_interest_tag_id")
                    .table(UserInterest::Table)
                    .col(UserInterest::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserInterest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserInterest {
    Table,
    UserId,
    TagId,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
}
