use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::error::Error;
use crate::models::user::User;
use crate::AppState;

fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(Error::Unauthorized("Not authenticated".to_string()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("Malformed authorization header".to_string()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("Unsupported authorization scheme".to_string()));
    };
    Ok(token.trim())
}

/// The authenticated, active caller. Rejects with 401 when the bearer token
/// is missing or invalid and 400 when the account is inactive.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        if let Some(user) = parts.extensions.get::<User>() {
            return Ok(Self(user.clone()));
        }

        let token = bearer_token(&parts.headers)?;
        let user = state.auth_service.resolve_user(token).await?;
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
