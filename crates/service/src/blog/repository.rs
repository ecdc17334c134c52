use async_trait::async_trait;

use common::pagination::{Page, PageRequest};
use models::{comment, post};

use super::filter::PostFilter;
use crate::errors::ServiceError;

/// Begins and finishes the unit of work that wraps one service call.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    type Tx: Send + Sync;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;
    async fn commit(&self, tx: Self::Tx) -> Result<(), ServiceError>;
    async fn rollback(&self, tx: Self::Tx) -> Result<(), ServiceError>;
}

/// Post persistence, always executed inside a transaction `Tx`.
#[async_trait]
pub trait PostRepository<Tx: Send + Sync>: Send + Sync {
    async fn search(&self, tx: &Tx, filter: &PostFilter, page: PageRequest) -> Result<Page<post::Model>, ServiceError>;
    async fn find_by_id(&self, tx: &Tx, id: i32) -> Result<Option<post::Model>, ServiceError>;
    async fn insert(&self, tx: &Tx, post: post::NewPost) -> Result<post::Model, ServiceError>;
    /// Fails with `NotFound` when the row no longer exists.
    async fn update(&self, tx: &Tx, post: post::Model) -> Result<post::Model, ServiceError>;
    /// Removes the post and its comments; `false` when no row matched.
    async fn delete(&self, tx: &Tx, id: i32) -> Result<bool, ServiceError>;
}

/// Comment persistence, always executed inside a transaction `Tx`.
#[async_trait]
pub trait CommentRepository<Tx: Send + Sync>: Send + Sync {
    async fn find_by_post_id(&self, tx: &Tx, post_id: i32, page: PageRequest) -> Result<Page<comment::Model>, ServiceError>;
    async fn find_by_id(&self, tx: &Tx, id: i32) -> Result<Option<comment::Model>, ServiceError>;
    async fn insert(&self, tx: &Tx, comment: comment::NewComment) -> Result<comment::Model, ServiceError>;
    /// `false` when no row matched.
    async fn delete(&self, tx: &Tx, id: i32) -> Result<bool, ServiceError>;
}
