//! Conversions between transport shapes (forms, details) and entities.
//!
//! One function per direction. Updates merge only the fields a form carries.

use models::{comment, post};

use super::domain::{CommentDetails, CommentForm, PostDetails, PostForm};

/// Form -> new entity. Missing title or content becomes an empty string and is
/// rejected by entity validation on insert.
pub fn post_from_form(form: PostForm) -> post::NewPost {
    post::NewPost {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        status: form.status.unwrap_or_default(),
    }
}

/// Form -> existing entity. `None` fields keep the entity's current value.
pub fn merge_post_form(form: PostForm, target: &mut post::Model) {
    if let Some(title) = form.title {
        target.title = title;
    }
    if let Some(content) = form.content {
        target.content = content;
    }
    if let Some(status) = form.status {
        target.status = status;
    }
}

pub fn comment_from_form(form: CommentForm, post_id: i32) -> comment::NewComment {
    comment::NewComment { post_id, content: form.content, author: form.author }
}

impl From<post::Model> for PostDetails {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<comment::Model> for CommentDetails {
    fn from(c: comment::Model) -> Self {
        Self { id: c.id, post_id: c.post_id, content: c.content, author: c.author, created_at: c.created_at }
    }
}
