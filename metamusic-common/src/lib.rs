//! # MetaMusic Common Library
//!
//! Shared code for the MetaMusic services including:
//! - Database initialization, schema and row models
//! - Configuration loading and root folder resolution
//! - Password hashing and session token primitives

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};

/// Generate a new entity id (UUIDv4, hyphenated text form)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
