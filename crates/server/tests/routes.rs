use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    root: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

async fn build_app() -> anyhow::Result<TestApp> {
    let root = std::env::temp_dir().join(format!("blog_server_routes_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.blog_api.data_path = root.clone();
    let router = server::startup::build_app(&cfg).await?;
    Ok(TestApp { router, root })
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let res = app.router.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn blog_post_crud_flow() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, created) = send(
        &app,
        "PUT",
        "/api/blogposts",
        Some(json!({"Title": "Hello", "Text": "First post", "Tags": [{"Name": "rust"}]})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let id = created["Id"].as_str().expect("id assigned").to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/blogposts/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["Title"], "Hello");
    assert_eq!(fetched["Tags"][0]["Name"], "rust");

    let (_, count) = send(&app, "GET", "/api/blogposts/count", None).await?;
    assert_eq!(count["count"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/blogposts/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    // second delete is still fine
    let (status, _) = send(&app, "DELETE", &format!("/api/blogposts/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/blogposts/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn listing_ignores_paging_query() -> anyhow::Result<()> {
    let app = build_app().await?;
    for n in 0..3 {
        let (status, _) = send(
            &app,
            "PUT",
            "/api/blogposts",
            Some(json!({"Title": format!("Post {n}"), "Text": "body"})),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, list) = send(&app, "GET", "/api/blogposts?numberofposts=1&startindex=2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn invalid_payload_is_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "PUT", "/api/tags", Some(json!({"Name": "  "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (_, tags) = send(&app, "GET", "/api/tags", None).await?;
    assert_eq!(tags, json!([]));
    Ok(())
}

#[tokio::test]
async fn categories_and_tags_round_trip() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, cat) = send(&app, "PUT", "/api/categories", Some(json!({"Name": "News"}))).await?;
    let cat_id = cat["Id"].as_str().unwrap().to_string();
    let (_, tag) = send(&app, "PUT", "/api/tags", Some(json!({"Name": "rust"}))).await?;
    let tag_id = tag["Id"].as_str().unwrap().to_string();

    let (status, got) = send(&app, "GET", &format!("/api/categories/{cat_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["Name"], "News");

    let (status, _) = send(&app, "GET", &format!("/api/categories/{tag_id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/tags/{tag_id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, tags) = send(&app, "GET", "/api/tags", None).await?;
    assert_eq!(tags, json!([]));
    Ok(())
}

#[tokio::test]
async fn invalidate_picks_up_external_files() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, cats) = send(&app, "GET", "/api/categories", None).await?;
    assert_eq!(cats, json!([]));

    let dir = app.root.join("Categories");
    tokio::fs::write(dir.join("ext.json"), r#"{"Id":"ext","Name":"External"}"#).await?;

    let (status, _) = send(&app, "POST", "/api/cache/invalidate", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, cats) = send(&app, "GET", "/api/categories", None).await?;
    assert_eq!(cats[0]["Id"], "ext");
    Ok(())
}
