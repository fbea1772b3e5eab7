/// Data models for TaskShare
///
/// Each model owns its SQL: structs derive `FromRow` and expose static
/// async functions over a `PgPool`. Handlers never write queries directly.
///
/// # Modules
///
/// - `user`: accounts with argon2-hashed credentials
/// - `list`: task lists and per-user overviews
/// - `share`: email-based list sharing
/// - `task`: ordered tasks with atomic reordering
/// - `comment`: threaded discussion on tasks

pub mod comment;
pub mod list;
pub mod share;
pub mod task;
pub mod user;

pub use comment::{Comment, CommentWithAuthor, CreateComment};
pub use list::{CreateList, ListOverview, TaskList};
pub use share::{CreateShare, ListShare, ShareWithUser};
pub use task::{CreateTask, Task, TaskOverview};
pub use user::{CreateUser, User, UserSummary};
