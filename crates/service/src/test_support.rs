#![cfg(test)]
use models::post::{self, NewPost, PostStatus};
use sea_orm::DatabaseConnection;

use crate::blog::SeaOrmBlogService;

/// Migrated in-memory database and a service over it.
pub async fn seaorm_service() -> Result<(SeaOrmBlogService, DatabaseConnection), anyhow::Error> {
    let db = models::db::connect_memory().await?;
    Ok((SeaOrmBlogService::from_connection(db.clone()), db))
}

/// Insert a post directly, bypassing the service.
pub async fn seed_post(db: &DatabaseConnection, title: &str, content: &str) -> Result<post::Model, anyhow::Error> {
    let p = post::insert(db, NewPost { title: title.into(), content: content.into(), status: PostStatus::default() }).await?;
    Ok(p)
}
