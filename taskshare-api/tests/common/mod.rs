/// Common test utilities for integration tests
///
/// Provides a test context holding a database pool and the full router,
/// plus helpers for creating users and making authenticated requests.
/// Tests drive the router directly through tower, no listening socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use taskshare_api::app::{build_router, AppState};
use taskshare_api::config::Config;
use taskshare_shared::auth::jwt::{create_token, Claims};
use taskshare_shared::auth::password::hash_password;
use taskshare_shared::models::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

/// A registered user with a valid token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context against the configured test database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Creates a user directly in the database with a known password
    /// and a valid token
    pub async fn create_user(&self, name: &str) -> anyhow::Result<TestUser> {
        let password_hash = hash_password("test-password-123")?;

        let user = User::create(
            &self.db,
            CreateUser {
                email: format!("{}-{}@example.com", name, Uuid::new_v4()),
                name: name.to_string(),
                password_hash,
            },
        )
        .await?;

        let claims = Claims::new(user.id, chrono::Duration::hours(self.config.jwt.ttl_hours));
        let token = create_token(&claims, &self.config.jwt.secret)?;

        Ok(TestUser { user, token })
    }

    /// Deletes users created by a test (cascades to their lists,
    /// shares, tasks, and comments)
    pub async fn cleanup_users(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        for id in ids {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.db)
                .await?;
        }
        Ok(())
    }

    /// Makes a request against the router and returns status + JSON body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Creates a list via the API, returning its id
pub async fn create_list(ctx: &TestContext, token: &str, title: &str) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            "/api/lists",
            Some(token),
            Some(serde_json::json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "list creation failed: {}", body);
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Creates a task via the API, returning its id
pub async fn create_task(ctx: &TestContext, token: &str, list_id: Uuid, title: &str) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            &format!("/api/lists/{}/tasks", list_id),
            Some(token),
            Some(serde_json::json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "task creation failed: {}", body);
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Shares a list with a user's email via the API
pub async fn share_list(ctx: &TestContext, token: &str, list_id: Uuid, email: &str) {
    let (status, body) = ctx
        .request(
            "POST",
            &format!("/api/lists/{}/share", list_id),
            Some(token),
            Some(serde_json::json!({ "email": email })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "share failed: {}", body);
}
