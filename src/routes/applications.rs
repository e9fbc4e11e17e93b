use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    dto::{
        application_dto::{ApplicationStatusPayload, ApplyPayload},
        common::Pagination,
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
    path = "/api/v1/applications/",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<Application>),
        (status = 403, description = "Caller has no job seeker profile"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied, or the job is not open")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let seeker = state.profile_service.require_job_seeker(&user).await?;
    let application = state
        .application_service
        .submit_application(payload.job_id, seeker.id, &user.email)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Every live application", body = Json<Vec<Application>>),
        (status = 403, description = "Admin only")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    AuthService::check_permission(&user, UserRole::Admin)?;
    let applications = state
        .application_service
        .list(page.offset(), page.limit())
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/my/applications",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "The caller's applications", body = Json<Vec<Application>>),
        (status = 403, description = "Caller has no job seeker profile")
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let seeker = state.profile_service.require_job_seeker(&user).await?;
    let applications = state
        .application_service
        .list_by_job_seeker(seeker.id, page.offset(), page.limit())
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/job/{job_id}",
    params(
        ("job_id" = i64, Path, description = "Job ID"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Applications for the job", body = Json<Vec<Application>>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn job_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<i64>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let applications = state
        .application_service
        .list_by_job(job_id, recruiter.id, page.offset(), page.limit())
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    put,
    path = "/api/v1/applications/{id}/status",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = ApplicationStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = Json<Application>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let application = state
        .application_service
        .update_application_status(id, payload.new_status, recruiter.id, Some(user.id))
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}/interviews",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Interviews for the application", body = Json<Vec<Interview>>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn application_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let interviews = state
        .interview_service
        .list_for_application(id, recruiter.id)
        .await?;
    Ok(Json(interviews))
}
