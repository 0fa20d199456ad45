//! Authentication middleware
//!
//! Protected handlers take a [`CurrentUser`], which only resolves for
//! requests carrying a valid bearer token.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::app::AppState;
use crate::services::auth::bearer_token;
use crate::utils::errors::ApiError;

/// Subject of the verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::NotAuthenticated)?;
        let username = state.services.auth.decode_subject(token)?;

        Ok(CurrentUser { username })
    }
}
