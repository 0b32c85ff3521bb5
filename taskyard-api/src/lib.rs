//! # Taskyard API Server Library
//!
//! Core functionality for the Taskyard API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `views`: Response serialization

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod views;
