use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use tracing::info;

use common::pagination::Page;
use service::blog::{CommentDetails, CommentForm};

use super::{PageQuery, ServerState};
use crate::errors::JsonApiError;

pub async fn list(State(state): State<ServerState>, Path(post_id): Path<i32>, Query(q): Query<PageQuery>) -> Result<Json<Page<CommentDetails>>, JsonApiError> {
    Ok(Json(state.blog.list_comments(post_id, q.page_request()).await?))
}

pub async fn create(State(state): State<ServerState>, Path(post_id): Path<i32>, Json(form): Json<CommentForm>) -> Result<(StatusCode, Json<CommentDetails>), JsonApiError> {
    let created = state.blog.create_comment(post_id, form).await?;
    info!(post_id, id = created.id, "created comment");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.blog.delete_comment(id).await?;
    info!(id, "deleted comment");
    Ok(StatusCode::NO_CONTENT)
}
