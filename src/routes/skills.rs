use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    dto::{common::Pagination, profile_dto::CreateSkillPayload},
    error::Result,
    middleware::{
        auth::CurrentUser,
        extract::{Json, Query},
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/skills",
    request_body = CreateSkillPayload,
    responses(
        (status = 201, description = "Skill created", body = Json<Skill>),
        (status = 409, description = "Skill name already taken")
    )
)]
#[axum::debug_handler]
pub async fn create_skill(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(payload): Json<CreateSkillPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let skill = state.skill_service.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

#[utoipa::path(
    get,
    path = "/api/v1/skills",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Skills", body = Json<Vec<Skill>>)
    )
)]
#[axum::debug_handler]
pub async fn list_skills(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let skills = state
        .skill_service
        .list(page.offset(), page.limit())
        .await?;
    Ok(Json(skills))
}
