use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginForm, RegisterPayload, TokenResponse},
    error::Result,
    middleware::extract::{Form, Json},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/auth/login/access-token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = Json<TokenResponse>),
        (status = 400, description = "Incorrect email or password, or inactive user"),
        (status = 429, description = "Too many attempts")
    )
)]
#[axum::debug_handler]
pub async fn login_access_token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse> {
    let token = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;
    Ok(Json(TokenResponse::bearer(token)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered", body = Json<User>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid payload"),
        (status = 429, description = "Too many attempts")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.auth_service.register_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
