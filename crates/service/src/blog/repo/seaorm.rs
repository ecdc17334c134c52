use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use common::pagination::{Direction, Page, PageRequest};
use models::errors::ModelError;
use models::{comment, post};

use crate::blog::filter::{like_pattern, PostFilter};
use crate::blog::repository::{CommentRepository, PostRepository, TransactionManager};
use crate::blog::service::BlogService;
use crate::errors::ServiceError;

/// Blog service wired to SeaORM repositories.
pub type SeaOrmBlogService = BlogService<SeaOrmTransactionManager, SeaOrmPostRepository, SeaOrmCommentRepository>;

impl SeaOrmBlogService {
    pub fn from_connection(db: DatabaseConnection) -> Self {
        BlogService::new(
            Arc::new(SeaOrmTransactionManager { db }),
            Arc::new(SeaOrmPostRepository),
            Arc::new(SeaOrmCommentRepository),
        )
    }
}

pub struct SeaOrmTransactionManager {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TransactionManager for SeaOrmTransactionManager {
    type Tx = DatabaseTransaction;

    async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn commit(&self, tx: DatabaseTransaction) -> Result<(), ServiceError> {
        tx.commit().await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn rollback(&self, tx: DatabaseTransaction) -> Result<(), ServiceError> {
        tx.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

fn order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

fn keyword_condition(keyword: &str) -> Condition {
    let pattern = like_pattern(keyword);
    Condition::any()
        .add(Expr::expr(Func::lower(Expr::col(post::Column::Title))).like(LikeExpr::new(pattern.clone()).escape('\\')))
        .add(Expr::expr(Func::lower(Expr::col(post::Column::Content))).like(LikeExpr::new(pattern).escape('\\')))
}

/// SQL condition for each filter case.
pub fn post_condition(filter: &PostFilter) -> Condition {
    match filter {
        PostFilter::All => Condition::all(),
        PostFilter::Keyword(k) => Condition::all().add(keyword_condition(k)),
        PostFilter::Status(s) => Condition::all().add(post::Column::Status.eq(*s)),
        PostFilter::KeywordAndStatus(k, s) => Condition::all()
            .add(post::Column::Status.eq(*s))
            .add(keyword_condition(k)),
    }
}

pub struct SeaOrmPostRepository;

#[async_trait]
impl PostRepository<DatabaseTransaction> for SeaOrmPostRepository {
    async fn search(&self, tx: &DatabaseTransaction, filter: &PostFilter, page: PageRequest) -> Result<Page<post::Model>, ServiceError> {
        let paginator = post::Entity::find()
            .filter(post_condition(filter))
            .order_by(post::Column::Id, order(page.direction))
            .paginate(tx, page.size);
        let total = paginator.num_items().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let rows = paginator.fetch_page(page.page).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Page::new(rows, page, total))
    }

    async fn find_by_id(&self, tx: &DatabaseTransaction, id: i32) -> Result<Option<post::Model>, ServiceError> {
        post::Entity::find_by_id(id).one(tx).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, tx: &DatabaseTransaction, new: post::NewPost) -> Result<post::Model, ServiceError> {
        Ok(post::insert(tx, new).await?)
    }

    async fn update(&self, tx: &DatabaseTransaction, p: post::Model) -> Result<post::Model, ServiceError> {
        let id = p.id;
        post::update(tx, p).await.map_err(|e| match e {
            ModelError::NotFound(entity) => ServiceError::not_found(entity, id),
            other => other.into(),
        })
    }

    async fn delete(&self, tx: &DatabaseTransaction, id: i32) -> Result<bool, ServiceError> {
        // comments follow through ON DELETE CASCADE
        Ok(post::delete(tx, id).await?)
    }
}

pub struct SeaOrmCommentRepository;

#[async_trait]
impl CommentRepository<DatabaseTransaction> for SeaOrmCommentRepository {
    async fn find_by_post_id(&self, tx: &DatabaseTransaction, post_id: i32, page: PageRequest) -> Result<Page<comment::Model>, ServiceError> {
        let paginator = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by(comment::Column::Id, order(page.direction))
            .paginate(tx, page.size);
        let total = paginator.num_items().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let rows = paginator.fetch_page(page.page).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Page::new(rows, page, total))
    }

    async fn find_by_id(&self, tx: &DatabaseTransaction, id: i32) -> Result<Option<comment::Model>, ServiceError> {
        comment::Entity::find_by_id(id).one(tx).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, tx: &DatabaseTransaction, new: comment::NewComment) -> Result<comment::Model, ServiceError> {
        Ok(comment::insert(tx, new).await?)
    }

    async fn delete(&self, tx: &DatabaseTransaction, id: i32) -> Result<bool, ServiceError> {
        Ok(comment::delete(tx, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};
    use models::PostStatus;

    fn sql(filter: &PostFilter) -> String {
        post::Entity::find().filter(post_condition(filter)).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn unfiltered_search_has_no_where_clause() {
        assert!(!sql(&PostFilter::All).contains("WHERE"));
    }

    #[test]
    fn keyword_search_matches_title_or_content() {
        let s = sql(&PostFilter::new(Some("First"), None));
        assert!(s.contains("LOWER(\"title\") LIKE '%first%'"), "{s}");
        assert!(s.contains(" OR "), "{s}");
        assert!(s.contains("LOWER(\"content\")"), "{s}");
        assert!(!s.contains("\"status\""), "{s}");
    }

    #[test]
    fn combined_search_adds_status() {
        let s = sql(&PostFilter::new(Some("first"), Some(PostStatus::Draft)));
        assert!(s.contains("\"post\".\"status\" = 'DRAFT'"), "{s}");
        assert!(s.contains(" AND "), "{s}");
    }
}
