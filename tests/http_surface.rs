//! End-to-end tests against a real listener: JSON API and HTML pages.

#![allow(clippy::panic)]

use std::net::SocketAddr;

use blog_cms::api::dto::PostDto;
use blog_cms::config::{BlogConfig, LogFormat};
use blog_cms::server::{build_app, prepare_state};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use serde_json::{Value, json};

struct TestServer {
    base: String,
    client: reqwest::Client,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

async fn spawn_server(seed: bool) -> TestServer {
    let Ok(listen_addr) = "127.0.0.1:0".parse::<SocketAddr>() else {
        panic!("addr");
    };
    let config = BlogConfig {
        listen_addr,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        database_connect_timeout_secs: 5,
        seed_on_startup: seed,
        log_format: LogFormat::Pretty,
    };
    let Ok(state) = prepare_state(&config).await else {
        panic!("startup failed");
    };
    let Ok(listener) = tokio::net::TcpListener::bind(listen_addr).await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    let app = build_app(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let Ok(client) = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
    else {
        panic!("client");
    };
    TestServer {
        base: format!("http://{addr}"),
        client,
    }
}

#[tokio::test]
async fn json_crud_lifecycle() {
    let server = spawn_server(false).await;

    let Ok(response) = server
        .client
        .post(server.url("/api/posts"))
        .json(&json!({"title": " A ", "author": "B", "content": "C"}))
        .send()
        .await
    else {
        panic!("create request");
    };
    assert_eq!(response.status(), StatusCode::CREATED);
    let Ok(created) = response.json::<PostDto>().await else {
        panic!("create body");
    };
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "A");
    assert!(created.created_at.is_some());

    let Ok(response) = server
        .client
        .put(server.url("/api/posts/1"))
        .json(&json!({"author": "Z"}))
        .send()
        .await
    else {
        panic!("update request");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let Ok(updated) = response.json::<PostDto>().await else {
        panic!("update body");
    };
    assert_eq!(updated.author, "Z");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.created_at, created.created_at);

    let Ok(response) = server.client.delete(server.url("/api/posts/1")).send().await else {
        panic!("delete request");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap_or(Value::Null);
    assert_eq!(body, json!({"status": "deleted", "id": 1}));

    let Ok(response) = server.client.get(server.url("/api/posts/1")).send().await else {
        panic!("get request");
    };
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap_or(Value::Null);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn seeded_startup_lists_sample_posts() {
    let server = spawn_server(true).await;

    let Ok(response) = server.client.get(server.url("/api/posts")).send().await else {
        panic!("list request");
    };
    let Ok(posts) = response.json::<Vec<PostDto>>().await else {
        panic!("list body");
    };
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Edit & Delete", "Hello SQLAlchemy"]);

    let Ok(response) = server.client.get(server.url("/")).send().await else {
        panic!("index request");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap_or_default();
    assert!(html.contains("Edit &amp; Delete"));
    assert!(html.contains("Hello SQLAlchemy"));
}

#[tokio::test]
async fn html_form_flow() {
    let server = spawn_server(false).await;

    let Ok(response) = server
        .client
        .post(server.url("/posts/new"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("title=From+a+form&author=Ada&content=Hello%0Aworld")
        .send()
        .await
    else {
        panic!("form request");
    };
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(location.as_deref(), Some("/posts/1"));

    let Ok(response) = server.client.get(server.url("/posts/1")).send().await else {
        panic!("detail request");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap_or_default();
    assert!(html.contains("From a form"));
    assert!(html.contains("Hello\nworld"));

    let Ok(response) = server
        .client
        .post(server.url("/posts/1/delete"))
        .send()
        .await
    else {
        panic!("delete request");
    };
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let Ok(response) = server.client.get(server.url("/posts/1")).send().await else {
        panic!("detail request");
    };
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_database() {
    let server = spawn_server(false).await;
    let Ok(response) = server.client.get(server.url("/health")).send().await else {
        panic!("health request");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap_or(Value::Null);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}
