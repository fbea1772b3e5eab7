/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskshare_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskshare_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskshare_shared::auth::{
    jwt,
    middleware::{extract_bearer_token, AuthContext, AuthError},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor; the
/// pool and config are both cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured token lifetime
    pub fn jwt_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.config.jwt.ttl_hours)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                           # Liveness probe (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register            # Public
///     │   ├── POST /login               # Public
///     │   └── GET  /me                  # Authenticated
///     ├── /lists/                       # Authenticated
///     │   ├── GET    /
///     │   ├── POST   /
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id
///     │   ├── POST   /:id/share
///     │   ├── DELETE /:id/share/:user_id
///     │   ├── GET    /:id/tasks
///     │   ├── POST   /:id/tasks
///     │   └── PATCH  /:id/tasks/reorder
///     ├── /tasks/                       # Authenticated
///     │   ├── PUT    /:id
///     │   ├── PATCH  /:id/toggle
///     │   ├── DELETE /:id
///     │   ├── GET    /:id/comments
///     │   └── POST   /:id/comments
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. JWT authentication (per route group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public auth endpoints plus /me, which carries its own auth layer
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/me",
            get(routes::auth::me).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                jwt_auth_layer,
            )),
        );

    let list_routes = Router::new()
        .route("/", get(routes::lists::list_lists))
        .route("/", post(routes::lists::create_list))
        .route("/:id", put(routes::lists::update_list))
        .route("/:id", delete(routes::lists::delete_list))
        .route("/:id/share", post(routes::lists::share_list))
        .route("/:id/share/:user_id", delete(routes::lists::revoke_share))
        .route("/:id/tasks", get(routes::tasks::list_tasks))
        .route("/:id/tasks", post(routes::tasks::create_task))
        .route("/:id/tasks/reorder", patch(routes::tasks::reorder_tasks))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let task_routes = Router::new()
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id/toggle", patch(routes::tasks::toggle_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/comments", get(routes::comments::list_comments))
        .route("/:id/comments", post(routes::comments::create_comment))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/lists", list_routes)
        .nest("/tasks", task_routes);

    // Permissive CORS for development, explicit origins otherwise
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn(move |req, next| {
            crate::middleware::security::security_headers(production, req, next)
        }))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token and injects [`AuthContext`] into request
/// extensions. Every failure mode produces the same 401.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
    });

    Ok(next.run(req).await)
}
