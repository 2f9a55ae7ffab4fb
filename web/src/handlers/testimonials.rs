//! Testimonial curation endpoints.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lumen_core::ids::{PhotographerId, ReviewId, TestimonialId, UserId};
use lumen_core::model::{Review, Testimonial};
use lumen_core::service::TestimonialPatch;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// `GET /api/testimonials`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(state.testimonial_service.list().await?))
}

/// `GET /api/testimonials/featured`
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(state.testimonial_service.featured().await?))
}

/// `GET /api/testimonials/photographer/:id`
pub async fn list_by_photographer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(
        state
            .testimonial_service
            .by_photographer(PhotographerId(id))
            .await?,
    ))
}

/// `GET /api/testimonials/available-reviews`
///
/// Reviews rated 4+ that have not been promoted yet.
pub async fn available_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.testimonial_service.available_reviews().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromoteRequest {
    review_id: Option<Uuid>,
    title: Option<String>,
}

/// `POST /api/testimonials`
pub async fn promote(
    State(state): State<AppState>,
    Json(body): Json<PromoteRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let review_id = body
        .review_id
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let testimonial = state
        .testimonial_service
        .promote(ReviewId(review_id), body.title)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Testimonial created successfully",
            "testimonial": testimonial,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTestimonialRequest {
    title: Option<String>,
    content: Option<String>,
    is_active: Option<bool>,
    is_featured: Option<bool>,
}

/// `PUT /api/testimonials/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTestimonialRequest>,
) -> Result<Json<Value>, AppError> {
    let testimonial = state
        .testimonial_service
        .update(
            TestimonialId(id),
            TestimonialPatch {
                title: body.title,
                content: body.content,
                is_active: body.is_active,
                is_featured: body.is_featured,
            },
        )
        .await?;
    Ok(Json(json!({
        "message": "Testimonial updated successfully",
        "testimonial": testimonial,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToggleFeaturedRequest {
    approved_by: Option<Uuid>,
}

/// `PUT /api/testimonials/:id/toggle-featured`
///
/// Turning featuring on stamps the approver and approval time.
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ToggleFeaturedRequest>,
) -> Result<Json<Value>, AppError> {
    let testimonial = state
        .testimonial_service
        .toggle_featured(TestimonialId(id), body.approved_by.map(UserId))
        .await?;
    Ok(Json(json!({
        "message": "Testimonial featured status updated",
        "testimonial": testimonial,
    })))
}

/// `PUT /api/testimonials/:id/toggle-active`
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let testimonial = state
        .testimonial_service
        .toggle_active(TestimonialId(id))
        .await?;
    Ok(Json(json!({
        "message": "Testimonial active status updated",
        "testimonial": testimonial,
    })))
}

/// `DELETE /api/testimonials/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.testimonial_service.delete(TestimonialId(id)).await?;
    Ok(Json(json!({ "message": "Testimonial deleted successfully" })))
}
