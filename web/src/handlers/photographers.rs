//! Photographer profiles, portfolios and availability.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use lumen_core::ids::{AvailabilityEntryId, PhotographerId, PortfolioItemId, UserId};
use lumen_core::model::{Photographer, PricingEntry, ServiceKind};
use lumen_core::service::{
    AvailabilityPatch, NewAvailability, NewPhotographer, PhotographerPatch, PortfolioItemInput,
    PortfolioItemPatch,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

fn parse_services(raw: Vec<String>) -> Result<Vec<ServiceKind>, AppError> {
    raw.into_iter()
        .map(|s| s.parse::<ServiceKind>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::bad_request)
}

/// `GET /api/photographers`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Photographer>>, AppError> {
    Ok(Json(state.photographers.list().await?))
}

/// `GET /api/photographers/featured`
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Photographer>>, AppError> {
    Ok(Json(state.photographer_service.featured().await?))
}

/// `GET /api/photographers/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Photographer>, AppError> {
    Ok(Json(state.photographers.get(PhotographerId(id)).await?))
}

/// `GET /api/photographers/user/:userId`
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Photographer>, AppError> {
    let profile = state
        .photographers
        .find_by_user(UserId(user_id))
        .await?
        .ok_or_else(|| AppError::not_found("Photographer not found"))?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePhotographerRequest {
    user_id: Uuid,
    specialization: String,
    #[serde(default)]
    services: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    experience: i32,
    #[serde(default)]
    pricing: Vec<PricingEntry>,
}

/// `POST /api/photographers`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePhotographerRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let photographer = state
        .photographer_service
        .create(NewPhotographer {
            user_id: UserId(body.user_id),
            specialization: body.specialization,
            services: parse_services(body.services)?,
            description: body.description,
            experience: body.experience,
            pricing: body.pricing,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Photographer profile created successfully",
            "photographer": photographer,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePhotographerRequest {
    specialization: Option<String>,
    services: Option<Vec<String>>,
    description: Option<String>,
    experience: Option<i32>,
    pricing: Option<Vec<PricingEntry>>,
}

/// `PUT /api/photographers/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePhotographerRequest>,
) -> Result<Json<Value>, AppError> {
    let services = body.services.map(parse_services).transpose()?;
    let photographer = state
        .photographer_service
        .update(
            PhotographerId(id),
            PhotographerPatch {
                specialization: body.specialization,
                services,
                description: body.description,
                experience: body.experience,
                pricing: body.pricing,
            },
        )
        .await?;
    Ok(Json(json!({
        "message": "Photographer profile updated successfully",
        "photographer": photographer,
    })))
}

/// `DELETE /api/photographers/:id`
///
/// Cascades like the admin route: bookings, reviews, the profile and
/// its paired user account.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.accounts.delete_photographer(PhotographerId(id)).await?;
    Ok(Json(
        json!({ "message": "Photographer deleted successfully" }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PortfolioItemRequest {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    category: String,
}

/// `POST /api/photographers/:id/portfolio`
pub async fn add_portfolio_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PortfolioItemRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let portfolio = state
        .photographer_service
        .add_portfolio_item(
            PhotographerId(id),
            PortfolioItemInput {
                title: body.title,
                description: body.description,
                image_url: body.image_url,
                category: body.category,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Portfolio item added successfully",
            "portfolio": portfolio,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PortfolioItemPatchRequest {
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    category: Option<String>,
}

/// `PUT /api/photographers/:id/portfolio/:itemId`
pub async fn update_portfolio_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<PortfolioItemPatchRequest>,
) -> Result<Json<Value>, AppError> {
    let portfolio = state
        .photographer_service
        .update_portfolio_item(
            PhotographerId(id),
            PortfolioItemId(item_id),
            PortfolioItemPatch {
                title: body.title,
                description: body.description,
                image_url: body.image_url,
                category: body.category,
            },
        )
        .await?;
    Ok(Json(json!({
        "message": "Portfolio item updated successfully",
        "portfolio": portfolio,
    })))
}

/// `DELETE /api/photographers/:id/portfolio/:itemId`
pub async fn remove_portfolio_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let portfolio = state
        .photographer_service
        .remove_portfolio_item(PhotographerId(id), PortfolioItemId(item_id))
        .await?;
    Ok(Json(json!({
        "message": "Portfolio item removed successfully",
        "portfolio": portfolio,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SlotRequest {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewAvailabilityRequest {
    date: NaiveDate,
    #[serde(default)]
    time_slots: Vec<SlotRequest>,
}

/// `POST /api/photographers/:id/availability`
pub async fn add_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewAvailabilityRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let availability = state
        .photographer_service
        .add_availability(
            PhotographerId(id),
            NewAvailability {
                date: body.date,
                time_slots: body
                    .time_slots
                    .into_iter()
                    .map(|slot| (slot.start, slot.end))
                    .collect(),
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Availability added successfully",
            "availability": availability,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityPatchRequest {
    date: Option<NaiveDate>,
    time_slots: Option<Vec<SlotRequest>>,
}

/// `PUT /api/photographers/:id/availability/:entryId`
pub async fn update_availability(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<AvailabilityPatchRequest>,
) -> Result<Json<Value>, AppError> {
    let availability = state
        .photographer_service
        .update_availability(
            PhotographerId(id),
            AvailabilityEntryId(entry_id),
            AvailabilityPatch {
                date: body.date,
                time_slots: body.time_slots.map(|slots| {
                    slots
                        .into_iter()
                        .map(|slot| (slot.start, slot.end))
                        .collect()
                }),
            },
        )
        .await?;
    Ok(Json(json!({
        "message": "Availability updated successfully",
        "availability": availability,
    })))
}

/// `DELETE /api/photographers/:id/availability/:entryId`
pub async fn remove_availability(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let availability = state
        .photographer_service
        .remove_availability(PhotographerId(id), AvailabilityEntryId(entry_id))
        .await?;
    Ok(Json(json!({
        "message": "Availability removed successfully",
        "availability": availability,
    })))
}
