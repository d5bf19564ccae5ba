//! HTTP API handlers for metamusic-web

pub mod admin;
pub mod auth;
pub mod browse;
pub mod buildinfo;
pub mod detail;
pub mod health;
pub mod profile;
pub mod search;
pub mod ui;

pub use auth::{require_admin, CurrentUser, MaybeUser};
pub use buildinfo::get_build_info;
pub use health::health_routes;
