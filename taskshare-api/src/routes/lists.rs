/// Task list endpoints
///
/// Reads are open to the owner and anyone the list is shared with;
/// renaming, deleting, sharing, and revoking are owner-only. Owner-only
/// routes answer 404 whether the list is missing or merely not theirs,
/// so a caller can never probe another user's list ids.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskshare_shared::{
    auth::{access, middleware::AuthContext},
    models::{CreateList, CreateShare, ListOverview, ListShare, ShareWithUser, TaskList, User},
};
use uuid::Uuid;
use validator::Validate;

const LIST_NOT_FOUND: &str = "List not found or access denied";

/// Create/rename list request
#[derive(Debug, Deserialize, Validate)]
pub struct ListRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
}

/// Share request
#[derive(Debug, Deserialize, Validate)]
pub struct ShareRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// An owned list with its current share grants
#[derive(Debug, Serialize)]
pub struct OwnedList {
    #[serde(flatten)]
    pub list: ListOverview,
    pub shares: Vec<ShareWithUser>,
}

/// Index response: owned and shared lists, separately
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub owned_lists: Vec<OwnedList>,
    pub shared_lists: Vec<ListOverview>,
}

/// GET /api/lists
///
/// Returns the caller's own lists (with their share grants) and the
/// lists shared with them, each newest first.
pub async fn list_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ListsResponse>> {
    let owned = TaskList::list_owned_by(&state.db, auth.user_id).await?;
    let shared_lists = TaskList::list_shared_with(&state.db, auth.user_id).await?;

    let mut owned_lists = Vec::with_capacity(owned.len());
    for list in owned {
        let shares = ListShare::list_for_list(&state.db, list.id).await?;
        owned_lists.push(OwnedList { list, shares });
    }

    Ok(Json(ListsResponse {
        owned_lists,
        shared_lists,
    }))
}

/// POST /api/lists
pub async fn create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ListRequest>,
) -> ApiResult<(StatusCode, Json<TaskList>)> {
    req.validate()?;

    let list = TaskList::create(
        &state.db,
        CreateList {
            title: req.title,
            owner_id: auth.user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/lists/:id
///
/// Renames a list. Owner-only; the update is scoped to the owner in SQL
/// so missing and not-owned are indistinguishable.
pub async fn update_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    Json(req): Json<ListRequest>,
) -> ApiResult<Json<TaskList>> {
    req.validate()?;

    let list = TaskList::update_title(&state.db, list_id, auth.user_id, &req.title)
        .await?
        .ok_or_else(|| ApiError::NotFound(LIST_NOT_FOUND.to_string()))?;

    Ok(Json(list))
}

/// DELETE /api/lists/:id
///
/// Deletes a list and everything under it. Owner-only.
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let deleted = TaskList::delete(&state.db, list_id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    Ok(Json(json!({ "message": "List deleted" })))
}

/// POST /api/lists/:id/share
///
/// Shares a list with another user by email. Owner-only. The recipient
/// must already have an account; sharing with yourself is rejected, and
/// sharing twice with the same user is a conflict.
pub async fn share_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<(StatusCode, Json<ShareWithUser>)> {
    req.validate()?;

    if !access::can_mutate_list(&state.db, list_id, auth.user_id).await? {
        return Err(ApiError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    let recipient = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if recipient.id == auth.user_id {
        return Err(ApiError::BadRequest("Cannot share with yourself".to_string()));
    }

    // Duplicate shares surface as a 409 via the unique constraint
    let share = ListShare::create(
        &state.db,
        CreateShare {
            list_id,
            user_id: recipient.id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShareWithUser {
            id: share.id,
            list_id: share.list_id,
            user_id: share.user_id,
            user_name: recipient.name,
            user_email: recipient.email,
            created_at: share.created_at,
        }),
    ))
}

/// DELETE /api/lists/:id/share/:user_id
///
/// Revokes a user's access to a list. Owner-only. The revoked user
/// immediately stops seeing the list.
pub async fn revoke_share(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((list_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Value>> {
    if !access::can_mutate_list(&state.db, list_id, auth.user_id).await? {
        return Err(ApiError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    let revoked = ListShare::delete(&state.db, list_id, user_id).await?;

    if !revoked {
        return Err(ApiError::NotFound("Share not found".to_string()));
    }

    Ok(Json(json!({ "message": "Share revoked" })))
}
