/// Task endpoints
///
/// Anyone with access to a list (owner or sharee) can create, edit,
/// toggle, delete, and reorder its tasks. Reads on an inaccessible list
/// answer 404; mutations on an existing task the caller cannot reach
/// answer 403, since the task id itself proves nothing about the list.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use taskshare_shared::{
    auth::{access, middleware::AuthContext},
    models::{CreateTask, Task, TaskOverview},
};
use uuid::Uuid;
use validator::Validate;

const LIST_NOT_FOUND: &str = "List not found or access denied";

/// Create/rename task request
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
}

/// Reorder request: every task id in the list, in desired order
#[derive(Debug, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(length(min = 1, message = "task_ids must not be empty"))]
    pub task_ids: Vec<Uuid>,
}

/// GET /api/lists/:id/tasks
///
/// Returns the list's tasks in display order with comment counts.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskOverview>>> {
    if !access::can_access_list(&state.db, list_id, auth.user_id).await? {
        return Err(ApiError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    let tasks = Task::list_for_list(&state.db, list_id).await?;
    Ok(Json(tasks))
}

/// POST /api/lists/:id/tasks
///
/// Appends a task to the list.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    if !access::can_access_list(&state.db, list_id, auth.user_id).await? {
        return Err(ApiError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            list_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = find_accessible_task(&state, task_id, auth.user_id).await?;

    let updated = Task::update_title(&state.db, task.id, &req.title)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// PATCH /api/tasks/:id/toggle
///
/// Flips the task's completed flag.
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = find_accessible_task(&state, task_id, auth.user_id).await?;

    let updated = Task::toggle_completed(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let task = find_accessible_task(&state, task_id, auth.user_id).await?;

    Task::delete(&state.db, task.id).await?;

    Ok(Json(json!({ "message": "Task deleted" })))
}

/// PATCH /api/lists/:id/tasks/reorder
///
/// Rewrites the list's task positions: `task_ids[i]` gets position `i`.
/// All updates happen in one transaction, so the order is never left
/// half-applied. Returns the list in its new order.
pub async fn reorder_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<Vec<TaskOverview>>> {
    req.validate()?;

    access::require_list_access(&state.db, list_id, auth.user_id).await?;

    Task::reorder(&state.db, list_id, &req.task_ids).await?;

    let tasks = Task::list_for_list(&state.db, list_id).await?;
    Ok(Json(tasks))
}

/// Loads a task and checks list access for mutation
///
/// A missing task is 404; an existing task on an inaccessible list
/// is 403.
async fn find_accessible_task(
    state: &AppState,
    task_id: Uuid,
    user_id: Uuid,
) -> ApiResult<Task> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    access::require_list_access(&state.db, task.list_id, user_id).await?;

    Ok(task)
}
