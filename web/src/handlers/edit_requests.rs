//! Photo edit request endpoints, including multipart photo uploads.

use crate::error::AppError;
use crate::state::AppState;
use crate::uploads::{EDIT_PHOTO_EXTENSIONS, EDIT_PHOTO_MAX_BYTES};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use lumen_core::ids::{EditRequestId, PhotographerId, UserId};
use lumen_core::model::{PhotoEditRequest, PhotoMeta};
use lumen_core::service::{EditRequestFilter, NewEditRequest};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

const UPLOAD_SUBDIR: &str = "photo-edit-requests";
const MAX_ORIGINAL_PHOTOS: usize = 10;
const MAX_EDITED_PHOTOS: usize = 20;

struct UploadedParts {
    text: std::collections::HashMap<String, String>,
    photos: Vec<PhotoMeta>,
}

/// Drain a multipart stream, saving file parts named `file_field` and
/// collecting the rest as text.
async fn read_parts(
    state: &AppState,
    mut multipart: Multipart,
    file_field: &str,
    max_photos: usize,
) -> Result<UploadedParts, AppError> {
    let mut text = std::collections::HashMap::new();
    let mut photos = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == file_field {
            if photos.len() >= max_photos {
                return Err(AppError::bad_request(format!(
                    "Maximum {max_photos} photos allowed"
                )));
            }
            let original_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;
            let photo = state
                .uploads
                .save_image(
                    UPLOAD_SUBDIR,
                    "photo-edit",
                    &original_name,
                    content_type.as_deref(),
                    &data,
                    EDIT_PHOTO_MAX_BYTES,
                    EDIT_PHOTO_EXTENSIONS,
                )
                .await?;
            photos.push(photo);
        } else {
            text.insert(name, field.text().await?);
        }
    }
    Ok(UploadedParts { text, photos })
}

fn parse_deadline(raw: Option<&String>) -> Result<Option<DateTime<Utc>>, AppError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DateTime<Utc>>()
                .map_err(|_| AppError::bad_request("Invalid deadline"))
        })
        .transpose()
}

/// `POST /api/photo-edit-requests`
///
/// Multipart: text fields plus up to 10 `originalPhotos` files.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let parts = read_parts(&state, multipart, "originalPhotos", MAX_ORIGINAL_PHOTOS).await?;
    let client_id = parts
        .text
        .get("clientId")
        .and_then(|s| s.parse::<Uuid>().ok())
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let title = parts
        .text
        .get("title")
        .filter(|t| !t.is_empty())
        .cloned()
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let deadline = parse_deadline(parts.text.get("deadline"))?;

    let request = state
        .edit_request_service
        .create(NewEditRequest {
            client_id: UserId(client_id),
            title,
            description: parts.text.get("description").cloned().unwrap_or_default(),
            client_notes: parts.text.get("clientNotes").cloned().unwrap_or_default(),
            priority: parts.text.get("priority").cloned(),
            deadline,
            original_photos: parts.photos,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Photo edit request created successfully",
            "request": request,
        })),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    status: Option<String>,
    priority: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

/// `GET /api/photo-edit-requests`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let page = state
        .edit_request_service
        .list(EditRequestFilter {
            status: params.status,
            priority: params.priority,
            page: params.page,
            limit: params.limit,
        })
        .await?;
    Ok(Json(json!({
        "requests": page.requests,
        "pagination": page.pagination,
    })))
}

/// `GET /api/photo-edit-requests/client/:id`
pub async fn list_by_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PhotoEditRequest>>, AppError> {
    Ok(Json(state.edit_requests.list_by_client(UserId(id)).await?))
}

/// `GET /api/photo-edit-requests/photographer/:id`
pub async fn list_by_photographer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PhotoEditRequest>>, AppError> {
    Ok(Json(
        state
            .edit_requests
            .list_by_photographer(PhotographerId(id))
            .await?,
    ))
}

/// `GET /api/photo-edit-requests/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoEditRequest>, AppError> {
    Ok(Json(state.edit_requests.get(EditRequestId(id)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignRequest {
    photographer_id: Option<Uuid>,
    assigned_by: Option<Uuid>,
    #[serde(default)]
    estimated_cost: f64,
    deadline: Option<DateTime<Utc>>,
}

/// `PUT /api/photo-edit-requests/:id/assign`
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(photographer_id), Some(assigned_by)) = (body.photographer_id, body.assigned_by)
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let request = state
        .edit_request_service
        .assign(
            EditRequestId(id),
            PhotographerId(photographer_id),
            UserId(assigned_by),
            body.estimated_cost,
            body.deadline,
        )
        .await?;
    Ok(Json(json!({
        "message": "Photographer assigned successfully",
        "request": request,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusRequest {
    status: Option<String>,
    photographer_notes: Option<String>,
    final_cost: Option<f64>,
}

/// `PUT /api/photo-edit-requests/:id/status`
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let request = state
        .edit_request_service
        .update_status(
            EditRequestId(id),
            &status,
            body.photographer_notes,
            body.final_cost,
        )
        .await?;
    Ok(Json(json!({
        "message": "Status updated successfully",
        "request": request,
    })))
}

/// `POST /api/photo-edit-requests/:id/edited-photos`
///
/// Multipart: up to 20 `editedPhotos` files plus an optional
/// `photographerNotes` text field. Marks the request completed.
pub async fn add_edited_photos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let parts = read_parts(&state, multipart, "editedPhotos", MAX_EDITED_PHOTOS).await?;
    if parts.photos.is_empty() {
        return Err(AppError::bad_request("No files uploaded"));
    }
    let request = state
        .edit_request_service
        .add_edited_photos(
            EditRequestId(id),
            parts.photos,
            parts.text.get("photographerNotes").cloned(),
        )
        .await?;
    Ok(Json(json!({
        "message": "Edited photos uploaded successfully",
        "request": request,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentRequest {
    payment_status: Option<String>,
}

/// `PUT /api/photo-edit-requests/:id/payment`
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let payment_status = body
        .payment_status
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let request = state
        .edit_request_service
        .update_payment(EditRequestId(id), &payment_status)
        .await?;
    Ok(Json(json!({
        "message": "Payment status updated successfully",
        "request": request,
    })))
}

/// `DELETE /api/photo-edit-requests/:id`
///
/// Removes the stored photos best-effort, then the record.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let request = state.edit_request_service.delete(EditRequestId(id)).await?;
    for photo in request
        .original_photos
        .iter()
        .chain(request.edited_photos.iter())
    {
        state.uploads.delete_by_public_path(&photo.path).await;
    }
    Ok(Json(
        json!({ "message": "Photo edit request deleted successfully" }),
    ))
}

/// `GET /api/photo-edit-requests/stats/overview`
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = state.edit_request_service.stats().await?;
    Ok(Json(json!({ "stats": stats })))
}
