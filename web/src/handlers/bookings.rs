//! Booking lifecycle endpoints.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use lumen_core::ids::{BookingId, PhotographerId, UserId};
use lumen_core::model::{Booking, BookingWindow, ContactInfo};
use lumen_core::service::{BookingPatch, NewBooking};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    client_id: Option<Uuid>,
    photographer_id: Option<Uuid>,
    service: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    duration: Option<i32>,
    location: Option<String>,
    #[serde(default)]
    notes: String,
    contact_phone: Option<String>,
    contact_email: Option<String>,
    total_amount: Option<f64>,
}

/// `POST /api/bookings`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(client_id), Some(photographer_id), Some(service), Some(date), Some(time), Some(duration), Some(location)) = (
        body.client_id,
        body.photographer_id,
        body.service,
        body.date,
        body.time,
        body.duration,
        body.location,
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let booking = state
        .booking_service
        .create(NewBooking {
            client_id: UserId(client_id),
            photographer_id: PhotographerId(photographer_id),
            service,
            date,
            time,
            duration,
            location,
            notes: body.notes,
            contact: ContactInfo {
                phone: body.contact_phone.unwrap_or_default(),
                email: body.contact_email.unwrap_or_default(),
            },
            total_amount: body.total_amount.unwrap_or_default(),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Booking created successfully", "booking": booking })),
    ))
}

/// `GET /api/bookings`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list().await?))
}

/// `GET /api/bookings/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.bookings.get(BookingId(id)).await?))
}

/// `GET /api/bookings/client/:clientId`
pub async fn list_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list_by_client(UserId(client_id)).await?))
}

/// `GET /api/bookings/photographer/:photographerId`
pub async fn list_by_photographer(
    State(state): State<AppState>,
    Path(photographer_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(
        state
            .bookings
            .list_by_photographer(PhotographerId(photographer_id))
            .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    status: Option<String>,
}

/// `PUT /api/bookings/:id/status`
///
/// Syncs the matching availability slot: confirming or completing
/// books it, cancelling a confirmed booking frees it.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let booking = state
        .booking_service
        .update_status(BookingId(id), &status)
        .await?;
    Ok(Json(json!({
        "message": "Booking status updated successfully",
        "booking": booking,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBookingRequest {
    service: Option<String>,
    date: Option<NaiveDate>,
    time_slot: Option<BookingWindow>,
    duration: Option<i32>,
    location: Option<String>,
    notes: Option<String>,
    contact: Option<ContactInfo>,
    price: Option<f64>,
}

/// `PUT /api/bookings/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .booking_service
        .update(
            BookingId(id),
            BookingPatch {
                service: body.service,
                date: body.date,
                time_slot: body.time_slot,
                duration: body.duration,
                location: body.location,
                notes: body.notes,
                contact: body.contact,
                price: body.price,
            },
        )
        .await?;
    Ok(Json(
        json!({ "message": "Booking updated successfully", "booking": booking }),
    ))
}

/// `DELETE /api/bookings/:id`
///
/// Frees the slot first if the booking was confirmed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.booking_service.delete(BookingId(id)).await?;
    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}
