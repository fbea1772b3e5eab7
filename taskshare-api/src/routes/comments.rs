/// Comment endpoints
///
/// Anyone with access to a task's list can read and post comments.
/// Both routes answer 404 when the task is missing or inaccessible.

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
use taskshare_shared::{
    auth::{access, middleware::AuthContext},
    models::{Comment, CommentWithAuthor, CreateComment, User},
};
use uuid::Uuid;
use validator::Validate;

const TASK_NOT_FOUND: &str = "Task not found or access denied";

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,
}

/// GET /api/tasks/:id/comments
///
/// Returns the task's comments with author info, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentWithAuthor>>> {
    if !access::can_access_task(&state.db, task_id, auth.user_id).await? {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    let comments = Comment::list_for_task(&state.db, task_id).await?;
    Ok(Json(comments))
}

/// POST /api/tasks/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentWithAuthor>)> {
    req.validate()?;

    if !access::can_access_task(&state.db, task_id, auth.user_id).await? {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    let author = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let comment = Comment::create(
        &state.db,
        CreateComment {
            content: req.content,
            task_id,
            user_id: auth.user_id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentWithAuthor {
            id: comment.id,
            content: comment.content,
            task_id: comment.task_id,
            user_id: comment.user_id,
            user_name: author.name,
            user_email: author.email,
            created_at: comment.created_at,
        }),
    ))
}
