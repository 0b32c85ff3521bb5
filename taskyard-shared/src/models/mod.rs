/// Database models
///
/// One module per table:
///
/// - `user`: User accounts (owners of everything else)
/// - `task`: Tasks with sub-task JSON and assignee relations
/// - `contact`: Contacts assignable to tasks
/// - `note`: Notes
/// - `assignee`: Task↔Contact join rows

pub mod assignee;
pub mod contact;
pub mod note;
pub mod task;
pub mod user;
