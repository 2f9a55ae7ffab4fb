//! User accounts and profile photo upload.

use crate::error::AppError;
use crate::state::AppState;
use crate::uploads::{PROFILE_EXTENSIONS, PROFILE_MAX_BYTES};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::Utc;
use lumen_core::ids::UserId;
use lumen_core::model::User;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// `GET /api/users`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list().await?))
}

/// `GET /api/users/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get(UserId(id)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserRequest {
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

/// `PUT /api/users/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let mut user = state.users.get(UserId(id)).await?;
    if let Some(username) = body.username {
        user.username = username;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(phone) = body.phone {
        user.phone = phone;
    }
    if let Some(address) = body.address {
        user.address = address;
    }
    user.updated_at = Utc::now();
    let user = state.users.update(&user).await?;
    Ok(Json(
        json!({ "message": "User updated successfully", "user": user }),
    ))
}

/// `DELETE /api/users/:id`
///
/// Cascades: the photographer profile (if any), bookings and reviews
/// go with the account.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.accounts.delete_user(UserId(id)).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// `POST /api/users/:id/upload-photo`
///
/// Single `profileImage` part; replaces and best-effort deletes the
/// previous file.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut user = state.users.get(UserId(id)).await?;

    let mut saved = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("profileImage") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        saved = Some(
            state
                .uploads
                .save_image(
                    "profiles",
                    "profile",
                    &original_name,
                    content_type.as_deref(),
                    &data,
                    PROFILE_MAX_BYTES,
                    PROFILE_EXTENSIONS,
                )
                .await?,
        );
    }
    let Some(photo) = saved else {
        return Err(AppError::bad_request("No file uploaded"));
    };

    if let Some(old) = user.profile_image.take() {
        state.uploads.delete_by_public_path(&old).await;
    }
    user.profile_image = Some(photo.path.clone());
    user.updated_at = Utc::now();
    let user = state.users.update(&user).await?;

    Ok(Json(json!({
        "message": "Profile photo uploaded successfully",
        "profileImage": photo.path,
        "user": user,
    })))
}
