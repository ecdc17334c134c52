use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use common::pagination::{Page, PageRequest};
use models::{comment, post, PostStatus};

use super::domain::{CommentDetails, CommentForm, PostDetails, PostForm};
use super::filter::PostFilter;
use super::mapping;
use super::repository::{CommentRepository, PostRepository, TransactionManager};
use crate::errors::{require_id, ServiceError};

/// Blog business service independent of web framework and storage.
///
/// Every public operation runs in its own transaction: committed when the
/// operation succeeds, rolled back when it returns an error.
pub struct BlogService<T, P, C> {
    tx: Arc<T>,
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<T, P, C> BlogService<T, P, C>
where
    T: TransactionManager,
    P: PostRepository<T::Tx>,
    C: CommentRepository<T::Tx>,
{
    pub fn new(tx: Arc<T>, posts: Arc<P>, comments: Arc<C>) -> Self { Self { tx, posts, comments } }

    /// Commit on success, roll back on error; the original error wins.
    async fn finish<R>(&self, tx: T::Tx, result: Result<R, ServiceError>) -> Result<R, ServiceError> {
        match result {
            Ok(value) => {
                self.tx.commit(tx).await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback(tx).await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Paginated search by optional keyword (title or content) and status.
    ///
    /// # Examples
    /// ```
    /// use common::pagination::PageRequest;
    /// use service::blog::{MemoryBlogService, PostForm};
    /// let svc = MemoryBlogService::in_memory();
    /// tokio_test::block_on(svc.create_post(PostForm::new("Hello", "first words"))).unwrap();
    /// let page = tokio_test::block_on(svc.search_posts(Some("hello"), None, PageRequest::new(0, 10))).unwrap();
    /// assert_eq!(page.total_elements, 1);
    /// ```
    #[instrument(skip(self, page), fields(page = page.page, size = page.size))]
    pub async fn search_posts(
        &self,
        keyword: Option<&str>,
        status: Option<PostStatus>,
        page: PageRequest,
    ) -> Result<Page<PostDetails>, ServiceError> {
        let page = page.normalize()?;
        let filter = PostFilter::new(keyword, status);
        debug!(?filter, "search posts");

        let tx = self.tx.begin().await?;
        let result = self.posts.search(&tx, &filter, page).await;
        let posts = self.finish(tx, result).await?;

        debug!(total = posts.total_elements, "posts found");
        Ok(posts.map(PostDetails::from))
    }

    #[instrument(skip(self, form))]
    pub async fn create_post(&self, form: PostForm) -> Result<PostDetails, ServiceError> {
        debug!(?form, "create post");
        let new = mapping::post_from_form(form);

        let tx = self.tx.begin().await?;
        let result = self.posts.insert(&tx, new).await;
        let saved = self.finish(tx, result).await?;

        info!(post_id = saved.id, "post_created");
        Ok(saved.into())
    }

    #[instrument(skip(self, form), fields(post_id = id))]
    pub async fn update_post(&self, id: i32, form: PostForm) -> Result<PostDetails, ServiceError> {
        require_id(id, "post id")?;
        debug!(?form, "update post");

        let tx = self.tx.begin().await?;
        let result = self.update_post_in(&tx, id, form).await;
        let saved = self.finish(tx, result).await?;

        info!(post_id = saved.id, "post_updated");
        Ok(saved.into())
    }

    async fn update_post_in(&self, tx: &T::Tx, id: i32, form: PostForm) -> Result<post::Model, ServiceError> {
        let mut existing = self.posts.find_by_id(tx, id).await?.ok_or(ServiceError::not_found("post", id))?;
        mapping::merge_post_form(form, &mut existing);
        self.posts.update(tx, existing).await
    }

    #[instrument(skip(self), fields(post_id = id))]
    pub async fn get_post(&self, id: i32) -> Result<PostDetails, ServiceError> {
        require_id(id, "post id")?;
        debug!("find post by id");

        let tx = self.tx.begin().await?;
        let result = self
            .posts
            .find_by_id(&tx, id)
            .await
            .and_then(|found| found.ok_or(ServiceError::not_found("post", id)));
        let found = self.finish(tx, result).await?;
        Ok(found.into())
    }

    /// Comments of a post. An unknown post id yields an empty page.
    #[instrument(skip(self, page), fields(page = page.page, size = page.size))]
    pub async fn list_comments(&self, post_id: i32, page: PageRequest) -> Result<Page<CommentDetails>, ServiceError> {
        require_id(post_id, "post id")?;
        let page = page.normalize()?;
        debug!("find comments by post id");

        let tx = self.tx.begin().await?;
        let result = self.comments.find_by_post_id(&tx, post_id, page).await;
        let comments = self.finish(tx, result).await?;

        debug!(total = comments.total_elements, "comments found");
        Ok(comments.map(CommentDetails::from))
    }

    #[instrument(skip(self, form))]
    pub async fn create_comment(&self, post_id: i32, form: CommentForm) -> Result<CommentDetails, ServiceError> {
        require_id(post_id, "post id")?;

        let tx = self.tx.begin().await?;
        let result = self.create_comment_in(&tx, post_id, form).await;
        let saved = self.finish(tx, result).await?;

        info!(post_id, comment_id = saved.id, "comment_created");
        Ok(saved.into())
    }

    async fn create_comment_in(&self, tx: &T::Tx, post_id: i32, form: CommentForm) -> Result<comment::Model, ServiceError> {
        let parent = self.posts.find_by_id(tx, post_id).await?.ok_or(ServiceError::not_found("post", post_id))?;
        self.comments.insert(tx, mapping::comment_from_form(form, parent.id)).await
    }

    /// Deletes the post together with its comments.
    #[instrument(skip(self), fields(post_id = id))]
    pub async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
        require_id(id, "post id")?;

        let tx = self.tx.begin().await?;
        let result = self.delete_post_in(&tx, id).await;
        self.finish(tx, result).await?;

        info!(post_id = id, "post_deleted");
        Ok(true)
    }

    async fn delete_post_in(&self, tx: &T::Tx, id: i32) -> Result<(), ServiceError> {
        if self.posts.find_by_id(tx, id).await?.is_none() {
            return Err(ServiceError::not_found("post", id));
        }
        // row may vanish between lookup and delete
        if !self.posts.delete(tx, id).await? {
            return Err(ServiceError::not_found("post", id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(comment_id = id))]
    pub async fn delete_comment(&self, id: i32) -> Result<(), ServiceError> {
        require_id(id, "comment id")?;
        debug!("delete comment by id");

        let tx = self.tx.begin().await?;
        let result = self.delete_comment_in(&tx, id).await;
        self.finish(tx, result).await?;

        info!(comment_id = id, "comment_deleted");
        Ok(())
    }

    async fn delete_comment_in(&self, tx: &T::Tx, id: i32) -> Result<(), ServiceError> {
        if self.comments.find_by_id(tx, id).await?.is_none() {
            return Err(ServiceError::not_found("comment", id));
        }
        if !self.comments.delete(tx, id).await? {
            return Err(ServiceError::not_found("comment", id));
        }
        Ok(())
    }
}
