use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, post};

pub const AUTHOR_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Post }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Post => Entity::belongs_to(post::Entity)
                .from(Column::PostId)
                .to(post::Column::Id)
                .into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq)]
pub struct NewComment {
    pub post_id: i32,
    pub content: String,
    pub author: Option<String>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.content.trim().is_empty() {
            return Err(errors::ModelError::Validation("content required".into()));
        }
        if let Some(author) = &self.author {
            if author.chars().count() > AUTHOR_MAX_LEN {
                return Err(errors::ModelError::Validation(format!("author must be at most {AUTHOR_MAX_LEN} characters")));
            }
        }
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, new: NewComment) -> Result<Model, errors::ModelError> {
    new.validate()?;
    let am = ActiveModel {
        id: NotSet,
        post_id: Set(new.post_id),
        content: Set(new.content),
        author: Set(new.author),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Hard delete; `false` when no row matched.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
