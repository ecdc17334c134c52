use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use common::pagination::{Direction, Page, PageRequest};
use models::PostStatus;
use service::blog::{PostDetails, PostForm};

use super::{PageQuery, ServerState};
use crate::errors::JsonApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub status: Option<PostStatus>,
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub direction: Option<Direction>,
}

impl SearchQuery {
    fn page_request(&self) -> PageRequest {
        PageQuery { page: self.page, size: self.size, direction: self.direction }.page_request()
    }
}

pub async fn search(State(state): State<ServerState>, Query(q): Query<SearchQuery>) -> Result<Json<Page<PostDetails>>, JsonApiError> {
    let page = state.blog.search_posts(q.q.as_deref(), q.status, q.page_request()).await?;
    Ok(Json(page))
}

pub async fn create(State(state): State<ServerState>, Json(form): Json<PostForm>) -> Result<(StatusCode, Json<PostDetails>), JsonApiError> {
    let created = state.blog.create_post(form).await?;
    info!(id = created.id, "created post");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<PostDetails>, JsonApiError> {
    Ok(Json(state.blog.get_post(id).await?))
}

pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(form): Json<PostForm>) -> Result<Json<PostDetails>, JsonApiError> {
    let updated = state.blog.update_post(id, form).await?;
    info!(id = updated.id, "updated post");
    Ok(Json(updated))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.blog.delete_post(id).await?;
    info!(id, "deleted post");
    Ok(StatusCode::NO_CONTENT)
}
