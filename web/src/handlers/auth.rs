//! Registration and login.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use lumen_core::model::Role;
use lumen_core::service::Registration;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    specialization: Option<String>,
    #[serde(default)]
    services: Vec<String>,
    experience: Option<i32>,
    description: Option<String>,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(username), Some(email), Some(password)) = (body.username, body.email, body.password)
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let role = body
        .role
        .map(|r| r.parse::<Role>())
        .transpose()
        .map_err(AppError::bad_request)?;
    let user = state
        .accounts
        .register(Registration {
            username,
            email,
            password,
            role,
            specialization: body.specialization,
            services: body.services,
            experience: body.experience,
            description: body.description,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully", "user": user })),
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let user = state.accounts.login(&username, &password).await?;
    Ok(Json(json!({ "message": "Login successful", "user": user })))
}
