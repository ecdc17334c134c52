use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Comment: listing by post
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_post")
                    .table(Comment::Table)
                    .col(Comment::PostId)
                    .to_owned(),
            )
            .await?;

        // Post: status filter
        manager
            .create_index(
                Index::create()
                    .name("idx_post_status")
                    .table(Post::Table)
                    .col(Post::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_comment_post").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_status").table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, PostId }

#[derive(DeriveIden)]
enum Post { Table, Status }
