//! Todos - a small CRUD service for todo items
//!
//! The service exposes:
//! - A single `Todo` resource with create, list, update and delete over HTTP
//! - A pluggable document store (in-memory or local filesystem)
//! - Generated OpenAPI documentation served at `/api-docs`

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
