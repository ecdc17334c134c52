use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::{AppConfig, DatabaseConfig};

struct TestApp {
    base_url: String,
    client: Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Serve the app over a fresh in-memory database on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = AppConfig { database: DatabaseConfig::from_url("sqlite::memory:"), ..Default::default() };
    let app = server::build_app(&cfg).await?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(TestApp { base_url: format!("http://{addr}"), client: Client::new() })
}

async fn body(res: reqwest::Response) -> anyhow::Result<(StatusCode, Value)> {
    let status = res.status();
    let text = res.text().await?;
    let value = if text.is_empty() { Value::Null } else { serde_json::from_str(&text)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, v) = body(app.client.get(app.url("/health")).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn post_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let (status, created) = body(
        c.post(app.url("/api/posts")).json(&json!({"title": "My first post", "content": "hello"})).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "DRAFT");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = body(c.get(app.url(&format!("/api/posts/{id}"))).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "My first post");

    let (status, updated) = body(
        c.put(app.url(&format!("/api/posts/{id}"))).json(&json!({"status": "PUBLISHED"})).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "PUBLISHED");
    assert_eq!(updated["content"], "hello");

    let (status, page) = body(
        c.get(app.url("/api/posts?q=FIRST&status=PUBLISHED&page=0&size=10")).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_elements"], 1);
    assert_eq!(page["content"][0]["id"], id);

    let res = c.delete(app.url(&format!("/api/posts/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let (status, v) = body(c.get(app.url(&format!("/api/posts/{id}"))).send().await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn bad_input_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let (status, v) = body(
        c.post(app.url("/api/posts")).json(&json!({"title": "  ", "content": "x"})).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Validation Error");

    let (status, v) = body(c.get(app.url("/api/posts?size=0")).send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Invalid Argument");

    let (status, v) = body(c.get(app.url("/api/posts?page=18446744073709551615")).send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Invalid Argument");

    let res = c.get(app.url("/api/posts/0")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn comment_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let (_, post) = body(c.post(app.url("/api/posts")).json(&json!({"title": "t", "content": "c"})).send().await?).await?;
    let id = post["id"].as_i64().unwrap();
    let comments = app.url(&format!("/api/posts/{id}/comments"));

    let (status, comment) = body(c.post(&comments).json(&json!({"content": "nice", "author": "ann"})).send().await?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["post_id"], id);
    c.post(&comments).json(&json!({"content": "second"})).send().await?;

    let (status, page) = body(c.get(format!("{comments}?direction=asc")).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_elements"], 2);
    assert_eq!(page["content"][0]["content"], "nice");

    let cid = comment["id"].as_i64().unwrap();
    let res = c.delete(app.url(&format!("/api/comments/{cid}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = c.delete(app.url(&format!("/api/comments/{cid}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = c.post(app.url("/api/posts/999/comments")).json(&json!({"content": "orphan"})).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
