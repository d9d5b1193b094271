//! Server-rendered pages: list, create, view, edit and delete posts.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use super::error::{PageError, not_found};
use super::templates::{self, FormValues};
use crate::app_state::AppState;
use crate::domain::{PostDraft, PostId};
use crate::error::BlogError;

/// Message shown when a form is submitted with a blank field.
pub const FORM_ERROR: &str = "All fields are required.";

/// Fields posted by the create and edit forms. Missing fields are blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    /// Title input.
    #[serde(default)]
    pub title: String,
    /// Author input.
    #[serde(default)]
    pub author: String,
    /// Content textarea.
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    fn trimmed(&self) -> FormValues<'_> {
        FormValues {
            title: self.title.trim(),
            author: self.author.trim(),
            content: self.content.trim(),
        }
    }
}

fn detail_url(id: PostId) -> String {
    format!("/posts/{id}")
}

/// `GET /` — list every post, newest first.
///
/// # Errors
///
/// Returns [`PageError`] on storage failure.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let posts = state.post_service.list_posts().await?;
    Ok(Html(templates::index_page(&posts)))
}

/// `GET /posts/new` — empty create form.
pub async fn new_post_page() -> Html<String> {
    Html(templates::new_post_page(FormValues::default(), None))
}

/// `POST /posts/new` — create a post, then show it.
///
/// # Errors
///
/// Returns [`PageError`] on storage failure.
pub async fn new_post_action(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<Response, PageError> {
    let Ok(draft) = PostDraft::new(&form.title, &form.author, &form.content) else {
        let page = templates::new_post_page(form.trimmed(), Some(FORM_ERROR));
        return Ok(Html(page).into_response());
    };
    let post = state.post_service.create_post(&draft).await?;
    Ok(Redirect::to(&detail_url(post.id)).into_response())
}

/// `GET /posts/{id}` — show one post.
///
/// # Errors
///
/// Returns [`PageError`] (rendered as the not-found page) if the post
/// does not exist.
pub async fn post_detail_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: PostId = raw_id.parse().map_err(BlogError::from)?;
    let post = state.post_service.get_post(id).await?;
    Ok(Html(templates::post_detail_page(&post)))
}

/// `GET /posts/{id}/edit` — edit form pre-filled with the stored post.
///
/// # Errors
///
/// Returns [`PageError`] (rendered as the not-found page) if the post
/// does not exist.
pub async fn edit_post_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: PostId = raw_id.parse().map_err(BlogError::from)?;
    let post = state.post_service.get_post(id).await?;
    Ok(Html(templates::edit_post_page(
        id,
        FormValues::from(&post),
        None,
    )))
}

/// `POST /posts/{id}/edit` — replace all three fields, then show the post.
///
/// The form is validated before the post is looked up.
///
/// # Errors
///
/// Returns [`PageError`] if the post does not exist or storage fails.
pub async fn edit_post_action(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Response, PageError> {
    let id: PostId = raw_id.parse().map_err(BlogError::from)?;
    let Ok(draft) = PostDraft::new(&form.title, &form.author, &form.content) else {
        return Ok(
            Html(templates::edit_post_page(id, form.trimmed(), Some(FORM_ERROR))).into_response(),
        );
    };
    state.post_service.replace_post(id, draft).await?;
    Ok(Redirect::to(&detail_url(id)).into_response())
}

/// `POST /posts/{id}/delete` — delete if present, then go back to the list.
///
/// # Errors
///
/// Returns [`PageError`] on storage failure. An unknown id is not an
/// error.
pub async fn delete_post_action(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, PageError> {
    if let Ok(id) = raw_id.parse::<PostId>() {
        state.post_service.delete_post_if_present(id).await?;
    }
    Ok(Redirect::to("/"))
}

/// Fallback for unknown routes.
pub async fn fallback() -> Response {
    not_found()
}

/// HTML routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/posts/new", get(new_post_page).post(new_post_action))
        .route("/posts/{id}", get(post_detail_page))
        .route("/posts/{id}/edit", get(edit_post_page).post(edit_post_action))
        .route("/posts/{id}/delete", post(delete_post_action))
}
