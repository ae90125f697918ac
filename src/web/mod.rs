//! HTTP layer - JSON API, server-rendered storefront and admin panel.
//!
//! Handlers are thin: they parse the request, call into [`crate::core`] and
//! render the result. All of them share [`state::AppState`].

/// Admin panel pages and multipart product forms
pub mod admin;
/// JSON API under `/api`
pub mod api;
/// HTTP error mapping
pub mod error;
/// Storefront and cart pages
pub mod pages;
/// Router assembly and middleware
pub mod router;
/// Shared handler state
pub mod state;
/// HTML rendering
pub mod views;

pub use error::{AppError, AppResult};
pub use router::build_app_router;
pub use state::AppState;
