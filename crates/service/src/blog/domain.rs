use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::PostStatus;

/// Client-settable post fields. Absent fields are left untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl PostForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: Some(content.into()), status: None }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Client-settable comment fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentForm {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Read-facing projection of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetails {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Read-facing projection of a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDetails {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}
