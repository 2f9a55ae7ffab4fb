//! Admin dashboard, reporting, moderation and settings.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use lumen_core::ids::{BookingId, PhotographerId, UserId};
use lumen_core::model::{
    AnalyticsPeriod, Booking, BookingPolicy, DashboardStats, Photographer, SocialLinks, User,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// `GET /api/admin/stats`
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.reporting.dashboard_stats(Utc::now()).await?))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyticsParams {
    period: Option<String>,
}

/// `GET /api/admin/analytics?period=week|month|year`
pub async fn analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<Value>, AppError> {
    let period = params
        .period
        .as_deref()
        .map(str::parse::<AnalyticsPeriod>)
        .transpose()
        .map_err(AppError::bad_request)?
        .unwrap_or_default();
    let data = state.reporting.analytics(period.cutoff(Utc::now())).await?;
    Ok(Json(json!({ "period": period, "data": data })))
}

/// `GET /api/admin/users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminUserUpdate {
    username: Option<String>,
    email: Option<String>,
    role: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

/// `PUT /api/admin/users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminUserUpdate>,
) -> Result<Json<Value>, AppError> {
    let mut user = state.users.get(UserId(id)).await?;
    if let Some(username) = body.username {
        user.username = username;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(role) = body.role {
        user.role = role.parse().map_err(AppError::bad_request)?;
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

/// `DELETE /api/admin/users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.accounts.delete_user(UserId(id)).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// `GET /api/admin/photographers`
pub async fn list_photographers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Photographer>>, AppError> {
    Ok(Json(state.photographers.list().await?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturedRequest {
    featured: Option<bool>,
}

/// `PUT /api/admin/photographers/:id/featured`
pub async fn set_featured(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FeaturedRequest>,
) -> Result<Json<Value>, AppError> {
    let featured = body
        .featured
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let photographer = state
        .photographer_service
        .set_featured(PhotographerId(id), featured)
        .await?;
    Ok(Json(json!({
        "message": "Photographer featured status updated",
        "photographer": photographer,
    })))
}

/// `DELETE /api/admin/photographers/:id`
pub async fn delete_photographer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.accounts.delete_photographer(PhotographerId(id)).await?;
    Ok(Json(
        json!({ "message": "Photographer deleted successfully" }),
    ))
}

/// `GET /api/admin/bookings`
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list().await?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    status: Option<String>,
}

/// `PUT /api/admin/bookings/:id/status`
///
/// Unlike the client route this does not touch availability slots.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let booking = state
        .booking_service
        .update_status_only(BookingId(id), &status)
        .await?;
    Ok(Json(json!({
        "message": "Booking status updated successfully",
        "booking": booking,
    })))
}

/// `DELETE /api/admin/bookings/:id`
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.booking_service.delete(BookingId(id)).await?;
    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}

/// `GET /api/admin/settings`
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let settings = state.settings.load().await?;
    Ok(Json(json!({ "settings": settings })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SettingsPatch {
    site_name: Option<String>,
    site_description: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    address: Option<String>,
    social_media: Option<SocialLinks>,
    booking_settings: Option<BookingPolicy>,
}

/// `PUT /api/admin/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsPatch>,
) -> Result<Json<Value>, AppError> {
    let mut settings = state.settings.load().await?;
    if let Some(site_name) = body.site_name {
        settings.site_name = site_name;
    }
    if let Some(site_description) = body.site_description {
        settings.site_description = site_description;
    }
    if let Some(contact_email) = body.contact_email {
        settings.contact_email = contact_email;
    }
    if let Some(contact_phone) = body.contact_phone {
        settings.contact_phone = contact_phone;
    }
    if let Some(address) = body.address {
        settings.address = address;
    }
    if let Some(social_media) = body.social_media {
        settings.social_media = social_media;
    }
    if let Some(booking_settings) = body.booking_settings {
        settings.booking_settings = booking_settings;
    }
    let settings = state.settings.save(&settings).await?;
    Ok(Json(json!({
        "message": "Settings updated successfully",
        "settings": settings,
    })))
}
