//! In-memory store for tests and doc examples.
//!
//! A transaction holds the store lock from `begin` until commit or rollback
//! and works on a private copy of the state. Commit writes the copy back,
//! rollback drops it. Transactions therefore run one at a time.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use common::pagination::{Direction, Page, PageRequest};
use models::{comment, post};

use crate::blog::filter::PostFilter;
use crate::blog::repository::{CommentRepository, PostRepository, TransactionManager};
use crate::blog::service::BlogService;
use crate::errors::ServiceError;

pub type MemoryBlogService = BlogService<MemoryStore, MemoryStore, MemoryStore>;

impl MemoryBlogService {
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        BlogService::new(Arc::clone(&store), Arc::clone(&store), store)
    }
}

#[derive(Clone, Debug, Default)]
struct MemoryState {
    posts: BTreeMap<i32, post::Model>,
    comments: BTreeMap<i32, comment::Model>,
    last_post_id: i32,
    last_comment_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Arc<AsyncMutex<MemoryState>>,
}

pub struct MemoryTx {
    committed: OwnedMutexGuard<MemoryState>,
    state: Mutex<MemoryState>,
}

fn lock(state: &Mutex<MemoryState>) -> Result<MutexGuard<'_, MemoryState>, ServiceError> {
    state.lock().map_err(|_| ServiceError::Db("memory store lock poisoned".into()))
}

fn page_of<T>(mut rows: Vec<T>, page: PageRequest) -> Page<T> {
    if page.direction == Direction::Desc {
        rows.reverse();
    }
    let total = rows.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(page.size).unwrap_or(usize::MAX);
    let content = rows.into_iter().skip(offset).take(size).collect();
    Page::new(content, page, total)
}

#[cfg(test)]
impl MemoryStore {
    /// Committed posts; waits for a running transaction to finish.
    async fn post_count(&self) -> usize {
        self.state.lock().await.posts.len()
    }
}

#[async_trait]
impl TransactionManager for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, ServiceError> {
        let committed = Arc::clone(&self.state).lock_owned().await;
        let snapshot = MemoryState::clone(&committed);
        Ok(MemoryTx { committed, state: Mutex::new(snapshot) })
    }

    async fn commit(&self, tx: MemoryTx) -> Result<(), ServiceError> {
        let MemoryTx { mut committed, state } = tx;
        *committed = state.into_inner().map_err(|_| ServiceError::Db("memory store lock poisoned".into()))?;
        Ok(())
    }

    async fn rollback(&self, tx: MemoryTx) -> Result<(), ServiceError> {
        drop(tx);
        Ok(())
    }
}

#[async_trait]
impl PostRepository<MemoryTx> for MemoryStore {
    async fn search(&self, tx: &MemoryTx, filter: &PostFilter, page: PageRequest) -> Result<Page<post::Model>, ServiceError> {
        let state = lock(&tx.state)?;
        let rows = state.posts.values().filter(|p| filter.matches(p)).cloned().collect();
        Ok(page_of(rows, page))
    }

    async fn find_by_id(&self, tx: &MemoryTx, id: i32) -> Result<Option<post::Model>, ServiceError> {
        Ok(lock(&tx.state)?.posts.get(&id).cloned())
    }

    async fn insert(&self, tx: &MemoryTx, new: post::NewPost) -> Result<post::Model, ServiceError> {
        new.validate()?;
        let mut state = lock(&tx.state)?;
        state.last_post_id += 1;
        let now = Utc::now().into();
        let created = post::Model {
            id: state.last_post_id,
            title: new.title,
            content: new.content,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, tx: &MemoryTx, mut p: post::Model) -> Result<post::Model, ServiceError> {
        p.validate()?;
        let mut state = lock(&tx.state)?;
        let stored = state.posts.get_mut(&p.id).ok_or(ServiceError::not_found("post", p.id))?;
        p.created_at = stored.created_at;
        p.updated_at = Utc::now().into();
        *stored = p.clone();
        Ok(p)
    }

    async fn delete(&self, tx: &MemoryTx, id: i32) -> Result<bool, ServiceError> {
        let mut state = lock(&tx.state)?;
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.comments.retain(|_, c| c.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository<MemoryTx> for MemoryStore {
    async fn find_by_post_id(&self, tx: &MemoryTx, post_id: i32, page: PageRequest) -> Result<Page<comment::Model>, ServiceError> {
        let state = lock(&tx.state)?;
        let rows = state.comments.values().filter(|c| c.post_id == post_id).cloned().collect();
        Ok(page_of(rows, page))
    }

    async fn find_by_id(&self, tx: &MemoryTx, id: i32) -> Result<Option<comment::Model>, ServiceError> {
        Ok(lock(&tx.state)?.comments.get(&id).cloned())
    }

    async fn insert(&self, tx: &MemoryTx, new: comment::NewComment) -> Result<comment::Model, ServiceError> {
        new.validate()?;
        let mut state = lock(&tx.state)?;
        if !state.posts.contains_key(&new.post_id) {
            return Err(ServiceError::Db(format!("foreign key violation: post {} missing", new.post_id)));
        }
        state.last_comment_id += 1;
        let created = comment::Model {
            id: state.last_comment_id,
            post_id: new.post_id,
            content: new.content,
            author: new.author,
            created_at: Utc::now().into(),
        };
        state.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&self, tx: &MemoryTx, id: i32) -> Result<bool, ServiceError> {
        Ok(lock(&tx.state)?.comments.remove(&id).is_some())
    }
}
