//! Post CRUD handlers: list, get, create, update, delete.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DeletePostResponse, PostDto, PostPayload};
use crate::app_state::AppState;
use crate::domain::PostId;
use crate::error::{BlogError, ErrorResponse};

/// `GET /posts` — List all posts, newest first.
///
/// # Errors
///
/// Returns [`BlogError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    summary = "List posts",
    description = "Returns every post ordered by id, newest first.",
    responses(
        (status = 200, description = "All posts", body = Vec<PostDto>),
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, BlogError> {
    let posts = state.post_service.list_posts().await?;
    let data: Vec<PostDto> = posts.into_iter().map(PostDto::from).collect();
    Ok(Json(data))
}

/// `GET /posts/{id}` — Get a single post.
///
/// # Errors
///
/// Returns [`BlogError::PostNotFound`] if the post does not exist.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Get a post",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Post record", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, BlogError> {
    let id: PostId = raw_id.parse()?;
    let post = state.post_service.get_post(id).await?;
    Ok(Json(PostDto::from(post)))
}

/// `POST /posts` — Create a post.
///
/// # Errors
///
/// Returns [`BlogError::Validation`] if any of `title`, `author`,
/// `content` is missing or blank.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    summary = "Create a post",
    description = "All three fields are required and are stored trimmed.",
    request_body = PostPayload,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Missing or blank field", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, BlogError> {
    let draft = PostPayload::from_body(&body).to_draft()?;
    let post = state.post_service.create_post(&draft).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// `PUT /posts/{id}` — Partially update a post.
///
/// # Errors
///
/// Returns [`BlogError::PostNotFound`] if the post does not exist, or
/// [`BlogError::Validation`] if a supplied field is blank.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Update a post",
    description = "Any subset of fields may be supplied; omitted fields are left unchanged. A blank field rejects the whole update.",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    request_body = PostPayload,
    responses(
        (status = 200, description = "Updated post", body = PostDto),
        (status = 400, description = "Blank field", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, BlogError> {
    let id: PostId = raw_id.parse()?;
    let patch = PostPayload::from_body(&body).to_patch();
    let post = state.post_service.update_post(id, &patch).await?;
    Ok(Json(PostDto::from(post)))
}

/// `DELETE /posts/{id}` — Delete a post.
///
/// # Errors
///
/// Returns [`BlogError::PostNotFound`] if the post does not exist.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Delete a post",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Post deleted", body = DeletePostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, BlogError> {
    let id: PostId = raw_id.parse()?;
    state.post_service.delete_post(id).await?;
    Ok(Json(DeletePostResponse::deleted(id)))
}

/// Post routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::{PostStore, StoreOptions};

    async fn make_router() -> Router {
        let Ok(store) = PostStore::connect(&StoreOptions::in_memory()).await else {
            panic!("in-memory store must open");
        };
        Router::new()
            .nest("/api", routes())
            .with_state(AppState::new(store))
    }

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            panic!("request build failed");
        };
        let Ok(response) = router.clone().oneshot(request).await else {
            panic!("router call failed");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn create_returns_201_with_assigned_fields() {
        let router = make_router().await;
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({"title": "A", "author": "B", "content": "C"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "A");
        assert_eq!(body["author"], "B");
        assert_eq!(body["content"], "C");
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn create_with_blank_field_is_400_and_persists_nothing() {
        let router = make_router().await;
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({"title": "A", "author": "   ", "content": "C"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "title, author, content are required"}));

        let (_, list) = call(&router, Method::GET, "/api/posts", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn get_unknown_is_404() {
        let router = make_router().await;
        let (status, body) = call(&router, Method::GET, "/api/posts/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));

        let (status, _) = call(&router, Method::GET, "/api/posts/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_blank_author_is_400_and_row_unchanged() {
        let router = make_router().await;
        let (_, created) = call(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({"title": "A", "author": "B", "content": "C"})),
        )
        .await;

        let (status, body) = call(
            &router,
            Method::PUT,
            "/api/posts/1",
            Some(json!({"title": "new", "author": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "author cannot be empty"}));

        let (_, fetched) = call(&router, Method::GET, "/api/posts/1", None).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let router = make_router().await;
        call(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({"title": "A", "author": "B", "content": "C"})),
        )
        .await;

        let (status, body) = call(
            &router,
            Method::PUT,
            "/api/posts/1",
            Some(json!({"content": "  fresh  "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "A");
        assert_eq!(body["author"], "B");
        assert_eq!(body["content"], "fresh");

        let (status, _) = call(
            &router,
            Method::PUT,
            "/api/posts/42",
            Some(json!({"content": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let router = make_router().await;
        call(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({"title": "A", "author": "B", "content": "C"})),
        )
        .await;

        let (status, body) = call(&router, Method::DELETE, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted", "id": 1}));

        let (status, _) = call(&router, Method::GET, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&router, Method::DELETE, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let router = make_router().await;
        for title in ["one", "two", "three"] {
            call(
                &router,
                Method::POST,
                "/api/posts",
                Some(json!({"title": title, "author": "a", "content": "c"})),
            )
            .await;
        }
        let (status, body) = call(&router, Method::GET, "/api/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        let Some(items) = body.as_array() else {
            panic!("expected array");
        };
        let titles: Vec<&str> = items.iter().filter_map(|p| p["title"].as_str()).collect();
        assert_eq!(titles, ["three", "two", "one"]);
    }
}
