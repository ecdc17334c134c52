//! Blog module: domain shapes, mapping, repositories and the service.
//!
//! Posts and comments are reached only through `BlogService`; storage sits
//! behind the traits in `repository`.

pub mod domain;
pub mod filter;
pub mod mapping;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{CommentDetails, CommentForm, PostDetails, PostForm};
pub use repo::memory::{MemoryBlogService, MemoryStore};
pub use repo::seaorm::SeaOrmBlogService;
pub use service::BlogService;
