//! Notification inbox endpoints

use axum::{
    Extension,
    extract::{Path, State},
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::Notification;

use crate::auth::UserIdentity;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Inbox {
    pub notifications: Vec<Notification>,
}

#[derive(Serialize)]
pub struct NotificationBody {
    pub notification: Notification,
}

/// GET /api/notifications/{user_id}
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ServiceResult<ApiResponse<Inbox>> {
    identity.require_self(user_id)?;
    let notifications = db::notifications::list_for_user(&state.pool, user_id).await?;
    Ok(ApiResponse::success(
        "Notifications retrieved",
        Inbox { notifications },
    ))
}

/// PUT /api/notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(notification_id): Path<i64>,
) -> ServiceResult<ApiResponse<NotificationBody>> {
    let notification = db::notifications::find(&state.pool, notification_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;
    if notification.user_id != identity.user_id {
        return Err(AppError::forbidden("Cannot acknowledge another user's notification").into());
    }

    let notification = db::notifications::mark_read(&state.pool, notification_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;
    Ok(ApiResponse::success(
        "Notification marked as read",
        NotificationBody { notification },
    ))
}
