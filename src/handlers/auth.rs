//! Signup and token endpoints

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::{Form, Json};

use crate::app::AppState;
use crate::models::{MessageResponse, TokenForm, TokenResponse, UserCreate};
use crate::utils::errors::{ApiError, Result};

pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserCreate>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    state.services.auth.signup(request).await?;

    Ok(Json(MessageResponse::new("User created successfully")))
}

/// OAuth2 password grant: form-encoded `username` and `password`
pub async fn login(
    State(state): State<AppState>,
    form: std::result::Result<Form<TokenForm>, FormRejection>,
) -> Result<Json<TokenResponse>> {
    let Form(credentials) = form?;

    let user = state
        .services
        .auth
        .authenticate_user(&credentials.username, &credentials.password)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    Ok(Json(state.services.auth.issue_token(&user)?))
}
