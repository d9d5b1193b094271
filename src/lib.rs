//! # blog-cms
//!
//! Minimal blog content-management service. Posts (title, author,
//! content, creation timestamp) live in a single SQLite table and are
//! exposed both as a JSON CRUD API and as server-rendered HTML pages.
//!
//! ## Architecture
//!
//! ```text
//! Clients (JSON, browser forms)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── HTML Handlers (web/)
//!     │
//!     ├── PostService (service/)
//!     │
//!     ├── PostStore + Session (persistence/)
//!     │
//!     └── SQLite
//! ```
//!
//! Every request opens one [`persistence::Session`], a transaction that
//! is committed on success and rolled back when dropped.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
pub mod web;
