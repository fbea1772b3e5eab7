/// HTTP middleware for the API server
///
/// # Modules
///
/// - `security`: security response headers
///
/// JWT authentication lives in `app.rs` as a `from_fn_with_state` layer
/// because it needs the application state for the signing secret.

pub mod security;
