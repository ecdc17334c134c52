use super::setup_test_db;
use crate::post::{self, NewPost, PostStatus};
use crate::comment::{self, NewComment};
use sea_orm::{TransactionTrait, EntityTrait, PaginatorTrait};
use anyhow::Result;

fn draft(title: &str) -> NewPost {
    NewPost { title: title.into(), content: "body".into(), status: PostStatus::Draft }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = post::insert(&txn, draft("committed")).await?;
    txn.commit().await?;

    let found = post::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|p| p.title), Some("committed".to_string()));
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = post::insert(&txn, draft("rolled back")).await?;
    comment::insert(&txn, NewComment { post_id: created.id, content: "gone too".into(), author: None }).await?;
    txn.rollback().await?;

    assert!(post::Entity::find_by_id(created.id).one(&db).await?.is_none());
    assert_eq!(comment::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Dropping an uncommitted transaction discards its writes
#[tokio::test]
async fn test_transaction_dropped_without_commit() -> Result<()> {
    let db = setup_test_db().await?;
    {
        let txn = db.begin().await?;
        post::insert(&txn, draft("dropped")).await?;
    }
    assert_eq!(post::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Deleting a post cascades to its comments through the foreign key
#[tokio::test]
async fn test_delete_post_cascades_comments() -> Result<()> {
    let db = setup_test_db().await?;
    let keep = post::insert(&db, draft("keep")).await?;
    let doomed = post::insert(&db, draft("doomed")).await?;
    for i in 0..3 {
        comment::insert(&db, NewComment { post_id: doomed.id, content: format!("c{i}"), author: None }).await?;
    }
    comment::insert(&db, NewComment { post_id: keep.id, content: "stays".into(), author: None }).await?;

    assert!(post::delete(&db, doomed.id).await?);

    let remaining = comment::Entity::find().all(&db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].post_id, keep.id);
    Ok(())
}
