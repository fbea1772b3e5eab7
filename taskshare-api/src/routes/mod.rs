/// Request handlers for the API server
///
/// # Modules
///
/// - `health`: liveness probe
/// - `auth`: registration, login, current user
/// - `lists`: task lists and sharing
/// - `tasks`: tasks and reordering
/// - `comments`: task comments

pub mod auth;
pub mod comments;
pub mod health;
pub mod lists;
pub mod tasks;
