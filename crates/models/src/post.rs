use sea_orm::{entity::prelude::*, ActiveValue::{NotSet, Unchanged}, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{comment, errors};

pub const TITLE_MAX_LEN: usize = 255;

/// Publication state of a post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Comment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Comment => Entity::has_many(comment::Entity).into(),
        }
    }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// A post that has not been persisted yet; the database assigns its id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

impl Model {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("title must be at most {TITLE_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), errors::ModelError> {
    if content.trim().is_empty() {
        return Err(errors::ModelError::Validation("content required".into()));
    }
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(db: &C, new: NewPost) -> Result<Model, errors::ModelError> {
    new.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        title: Set(new.title),
        content: Set(new.content),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite the mutable columns of an existing row and refresh `updated_at`.
pub async fn update<C: ConnectionTrait>(db: &C, post: Model) -> Result<Model, errors::ModelError> {
    post.validate()?;
    let am = ActiveModel {
        id: Unchanged(post.id),
        title: Set(post.title),
        content: Set(post.content),
        status: Set(post.status),
        created_at: Unchanged(post.created_at),
        updated_at: Set(Utc::now().into()),
    };
    am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => errors::ModelError::NotFound("post"),
        other => errors::ModelError::Db(other.to_string()),
    })
}

/// Hard delete; `false` when no row matched.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
