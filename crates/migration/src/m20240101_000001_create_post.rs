//! Create `post` table.
//! Status is stored as its upper-case name (`DRAFT`, `PUBLISHED`).
use sea_orm_migration::{prelude::*, schema::*};

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
                    .col(pk_auto(Post::Id))
                    .col(string_len(Post::Title, 255).not_null())
                    .col(text(Post::Content).not_null())
                    .col(string_len(Post::Status, 16).not_null().default("DRAFT"))
                    .col(timestamp_with_time_zone(Post::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Post::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Post::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Post { Table, Id, Title, Content, Status, CreatedAt, UpdatedAt }
