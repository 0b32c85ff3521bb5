/// API route handlers
///
/// One module per resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `tasks`: Task CRUD and assignee management
/// - `contacts`: Contact CRUD
/// - `notes`: Note CRUD

pub mod auth;
pub mod contacts;
pub mod health;
pub mod notes;
pub mod tasks;
