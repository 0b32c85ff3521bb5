//! # Taskyard Shared Library
//!
//! Shared functionality for the Taskyard API server:
//!
//! - `models`: Database models (User, Task, Contact, Note, TaskAssignee)
//! - `db`: Connection pool and migrations
//! - `auth`: Password hashing and `X-User-Id` header identification
//! - `patch`: Tri-state partial-update helpers

pub mod auth;
pub mod db;
pub mod models;
pub mod patch;
