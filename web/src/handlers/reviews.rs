//! Review endpoints, including stats and photographer responses.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lumen_core::ids::{BookingId, PhotographerId, ReviewId, UserId};
use lumen_core::model::Review;
use lumen_core::service::{NewReview, ReviewPatch};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReviewRequest {
    client_id: Option<Uuid>,
    photographer_id: Option<Uuid>,
    booking_id: Option<Uuid>,
    rating: Option<i32>,
    #[serde(default)]
    title: String,
    comment: Option<String>,
    service_type: Option<String>,
}

/// `POST /api/reviews`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(client_id), Some(photographer_id), Some(rating), Some(comment)) = (
        body.client_id,
        body.photographer_id,
        body.rating,
        body.comment,
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let review = state
        .review_service
        .create(NewReview {
            client_id: UserId(client_id),
            photographer_id: PhotographerId(photographer_id),
            booking_id: body.booking_id.map(BookingId),
            rating,
            title: body.title,
            comment,
            service_type: body.service_type,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Review created successfully", "review": review })),
    ))
}

/// `GET /api/reviews`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.reviews.list().await?))
}

/// `GET /api/reviews/photographer/:id`
pub async fn list_by_photographer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let reviews = state
        .reviews
        .list_by_photographer(PhotographerId(id))
        .await?;
    Ok(Json(json!({
        "reviews": reviews,
        "totalReviews": reviews.len(),
    })))
}

/// `GET /api/reviews/photographer/:id/stats`
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let stats = state.review_service.stats(PhotographerId(id)).await?;
    Ok(Json(json!({ "stats": stats })))
}

/// `GET /api/reviews/client/:id`
pub async fn list_by_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.reviews.list_by_client(UserId(id)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateReviewRequest {
    rating: Option<i32>,
    title: Option<String>,
    comment: Option<String>,
    service_type: Option<String>,
}

/// `PUT /api/reviews/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let review = state
        .review_service
        .update(
            ReviewId(id),
            ReviewPatch {
                rating: body.rating,
                title: body.title,
                comment: body.comment,
                service_type: body.service_type,
            },
        )
        .await?;
    Ok(Json(
        json!({ "message": "Review updated successfully", "review": review }),
    ))
}

/// `DELETE /api/reviews/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.review_service.delete(ReviewId(id)).await?;
    Ok(Json(json!({ "message": "Review deleted successfully" })))
}

/// `PUT /api/reviews/:id/helpful`
pub async fn add_helpful_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let votes = state.review_service.add_helpful_vote(ReviewId(id)).await?;
    Ok(Json(json!({
        "message": "Vote recorded",
        "helpfulVotes": votes,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseRequest {
    photographer_id: Option<Uuid>,
    message: Option<String>,
}

/// `POST /api/reviews/:id/response`
pub async fn respond(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResponseRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(photographer_id), Some(message)) = (body.photographer_id, body.message) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let review = state
        .review_service
        .respond(ReviewId(id), PhotographerId(photographer_id), message)
        .await?;
    Ok(Json(
        json!({ "message": "Response added successfully", "review": review }),
    ))
}
