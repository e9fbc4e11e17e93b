use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    dto::{
        auth_dto::{RegisterPayload, UpdateUserPayload},
        common::Pagination,
    },
    error::Result,
    middleware::{
        auth::CurrentUser,
        extract::{Json, Path, Query},
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/users/",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User created", body = Json<User>),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.auth_service.register_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Users", body = Json<Vec<User>>)
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let users = state
        .user_service
        .list(page.offset(), page.limit())
        .await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "The authenticated user", body = Json<User>),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn read_user_me(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse> {
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated", body = Json<User>),
        (status = 403, description = "Role or active flag change without admin rights"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn update_user_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let updated = state.user_service.update(&user, user.id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = Json<User>),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user))
}
