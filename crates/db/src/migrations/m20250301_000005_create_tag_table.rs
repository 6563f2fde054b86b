//! Create tag table migration.
//!
//! Tags are immutable reference data, so the catalog is seeded here.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEED_TAGS: &[(&str, &str)] = &[
    ("tag_rust", "Rust"),
    ("tag_webdev", "Web Development"),
    ("tag_devops", "DevOps"),
    ("tag_gamedev", "Game Development"),
    ("tag_ml", "Machine Learning"),
    ("tag_mobile", "Mobile"),
    ("tag_security", "Security"),
    ("tag_databases", "Databases"),
    ("tag_frontend", "Frontend"),
    ("tag_backend", "Backend"),
    ("tag_career", "Career"),
    ("tag_opensource", "Open Source"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tag::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name])
            .to_owned();
        for (id, name) in SEED_TAGS {
            insert.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
    Name,
}
