//! HTML page renderer.
//!
//! Each function returns a complete HTML document. Every piece of user
//! supplied text passes through [`escape`] before it is written out.

use crate::domain::{Post, PostId};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem;color:#222}\
header{display:flex;justify-content:space-between;align-items:baseline}\
a{color:#0b5cad}\
article{border-bottom:1px solid #ddd;padding:.75rem 0}\
.meta{color:#666;font-size:.9em}\
.content{white-space:pre-wrap}\
.error{background:#fde8e8;border:1px solid #f5a5a5;padding:.5rem .75rem}\
label{display:block;margin:.75rem 0 .25rem}\
input,textarea{width:100%;box-sizing:border-box;padding:.4rem}\
textarea{min-height:10rem}\
form.inline{display:inline}\
button{margin-top:.75rem}";

/// Values echoed back into a create or edit form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValues<'a> {
    /// Title field.
    pub title: &'a str,
    /// Author field.
    pub author: &'a str,
    /// Content field.
    pub content: &'a str,
}

impl<'a> From<&'a Post> for FormValues<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            author: &post.author,
            content: &post.content,
        }
    }
}

/// Escapes text for use in element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · Blog</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><h1><a href=\"/\">Blog</a></h1><a href=\"/posts/new\">New post</a></header>\n\
         {body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn timestamp(post: &Post) -> String {
    post.created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

fn delete_button(id: PostId) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/posts/{id}/delete\" \
         onsubmit=\"return confirm('Delete this post?');\">\
         <button type=\"submit\">Delete</button></form>"
    )
}

/// `GET /` — every post, in the order given.
#[must_use]
pub fn index_page(posts: &[Post]) -> String {
    let body = if posts.is_empty() {
        "<p>No posts yet. <a href=\"/posts/new\">Write the first one.</a></p>".to_string()
    } else {
        posts
            .iter()
            .map(|post| {
                format!(
                    "<article>\n<h2><a href=\"/posts/{id}\">{title}</a></h2>\n\
                     <p class=\"meta\">by {author} · {when}</p>\n\
                     <p><a href=\"/posts/{id}/edit\">Edit</a> {delete}</p>\n</article>",
                    id = post.id,
                    title = escape(&post.title),
                    author = escape(&post.author),
                    when = timestamp(post),
                    delete = delete_button(post.id),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    layout("Posts", &body)
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|msg| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape(msg)))
        .unwrap_or_default()
}

fn post_form(action: &str, values: FormValues<'_>, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label for=\"title\">Title</label>\
         <input id=\"title\" name=\"title\" maxlength=\"200\" value=\"{title}\">\n\
         <label for=\"author\">Author</label>\
         <input id=\"author\" name=\"author\" maxlength=\"100\" value=\"{author}\">\n\
         <label for=\"content\">Content</label>\
         <textarea id=\"content\" name=\"content\">{content}</textarea>\n\
         <button type=\"submit\">{submit}</button>\n</form>",
        action = escape(action),
        title = escape(values.title),
        author = escape(values.author),
        content = escape(values.content),
    )
}

/// `GET|POST /posts/new` — the create form, optionally with an error.
#[must_use]
pub fn new_post_page(values: FormValues<'_>, error: Option<&str>) -> String {
    let body = format!(
        "<h2>New post</h2>\n{banner}{form}",
        banner = error_banner(error),
        form = post_form("/posts/new", values, "Publish"),
    );
    layout("New post", &body)
}

/// `GET|POST /posts/{id}/edit` — the edit form, optionally with an error.
#[must_use]
pub fn edit_post_page(id: PostId, values: FormValues<'_>, error: Option<&str>) -> String {
    let body = format!(
        "<h2>Edit post</h2>\n{banner}{form}\n<p><a href=\"/posts/{id}\">Cancel</a></p>",
        banner = error_banner(error),
        form = post_form(&format!("/posts/{id}/edit"), values, "Save"),
    );
    layout("Edit post", &body)
}

/// `GET /posts/{id}` — a single post.
#[must_use]
pub fn post_detail_page(post: &Post) -> String {
    let body = format!(
        "<article>\n<h2>{title}</h2>\n<p class=\"meta\">by {author} · {when}</p>\n\
         <div class=\"content\">{content}</div>\n</article>\n\
         <p><a href=\"/posts/{id}/edit\">Edit</a> {delete} <a href=\"/\">Back</a></p>",
        id = post.id,
        title = escape(&post.title),
        author = escape(&post.author),
        content = escape(&post.content),
        when = timestamp(post),
        delete = delete_button(post.id),
    );
    layout(&post.title, &body)
}

/// Generic 404 page.
#[must_use]
pub fn not_found_page() -> String {
    layout(
        "Not found",
        "<h2>Not Found</h2>\n<p>The requested page does not exist.</p>\n<p><a href=\"/\">Back to posts</a></p>",
    )
}

/// Generic 500 page.
#[must_use]
pub fn server_error_page() -> String {
    layout(
        "Error",
        "<h2>Internal Server Error</h2>\n<p>Something went wrong. Please try again.</p>",
    )
}
