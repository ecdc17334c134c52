//! Create `comment` table with FK to `post`.
//!
//! Deleting a post removes its comments through `ON DELETE CASCADE`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(integer(Comment::PostId).not_null())
                    .col(text(Comment::Content).not_null())
                    .col(
                        ColumnDef::new(Comment::Author)
                            .string_len(128)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Comment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_post")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, Id, PostId, Content, Author, CreatedAt }

#[derive(DeriveIden)]
enum Post { Table, Id }
