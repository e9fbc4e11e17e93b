use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    dto::{
        common::Pagination,
        profile_dto::{ScheduleInterviewPayload, UpdateInterviewPayload},
    },
    error::Result,
    middleware::{
        auth::CurrentUser,
        extract::{Json, Path, Query},
    },
    models::user::UserRole,
    services::auth_service::AuthService,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/interviews",
    request_body = ScheduleInterviewPayload,
    responses(
        (status = 201, description = "Interview scheduled", body = Json<Interview>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let interview = state
        .interview_service
        .schedule(payload, recruiter.id, Some(user.id))
        .await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

#[utoipa::path(
    get,
    path = "/api/v1/interviews",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Every live interview", body = Json<Vec<Interview>>),
        (status = 403, description = "Admin only")
    )
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    AuthService::check_permission(&user, UserRole::Admin)?;
    let interviews = state
        .interview_service
        .list(page.offset(), page.limit())
        .await?;
    Ok(Json(interviews))
}

#[utoipa::path(
    put,
    path = "/api/v1/interviews/{id}",
    params(
        ("id" = i64, Path, description = "Interview ID")
    ),
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = Json<Interview>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let interview = state
        .interview_service
        .update(id, payload, recruiter.id)
        .await?;
    Ok(Json(interview))
}
