/// TaskShare REST API server
///
/// Exposes the collaborative task-list API over HTTP:
///
/// - `/health`: liveness probe
/// - `/api/auth`: registration, login, current user
/// - `/api/lists`: task lists, sharing, and revocation
/// - `/api/tasks`: tasks within lists, including atomic reordering
/// - `/api/comments`: discussion threads on tasks
///
/// # Modules
///
/// - [`app`]: application state and router construction
/// - [`config`]: environment-based configuration
/// - [`error`]: unified error-to-HTTP mapping
/// - [`middleware`]: auth and security-header middleware
/// - [`routes`]: request handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
