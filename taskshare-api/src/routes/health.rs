/// Health check endpoint

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// GET /health
///
/// Verifies the database is reachable and reports the running version.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    taskshare_shared::db::pool::health_check(&state.db).await?;

    Ok(Json(json!({
        "status": "ok",
        "version": taskshare_shared::VERSION,
    })))
}
