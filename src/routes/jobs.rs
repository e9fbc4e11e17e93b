use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    dto::{
        common::Pagination,
        job_dto::{ActiveJobsCount, CreateJobPayload, JobSearchQuery, JobStatusQuery},
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
    path = "/api/v1/jobs/",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posted", body = Json<Job>),
        (status = 400, description = "Salary range is inverted"),
        (status = 403, description = "Caller is not a recruiter"),
        (status = 404, description = "Unknown skill id")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    AuthService::check_permission(&user, UserRole::Recruiter)?;

    let recruiter_id = match payload.recruiter_id {
        Some(id) if user.role == UserRole::Admin => {
            state.profile_service.get_recruiter(id).await?.id
        }
        _ => state.profile_service.require_recruiter(&user).await?.id,
    };
    let job = state
        .job_service
        .create_job_posting(payload, recruiter_id, Some(user.id))
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Jobs in id order", body = Json<Vec<Job>>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let jobs = state
        .job_service
        .list_jobs(page.offset(), page.limit())
        .await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/search",
    params(
        ("location" = Option<String>, Query, description = "Location substring, any case"),
        ("job_type" = Option<String>, Query, description = "Job type, e.g. FULL_TIME"),
        ("min_salary" = Option<i64>, Query, description = "Minimum of salary_min"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Open jobs matching every filter", body = Json<Vec<Job>>),
        (status = 429, description = "Search rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.search_jobs(query.into()).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/my/jobs",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Jobs posted by the caller", body = Json<Vec<Job>>),
        (status = 403, description = "Caller has no recruiter profile")
    )
)]
#[axum::debug_handler]
pub async fn my_jobs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let jobs = state
        .job_service
        .jobs_for_recruiter(recruiter.id, page.offset(), page.limit())
        .await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/stats/active-count",
    responses(
        (status = 200, description = "Number of open jobs", body = Json<ActiveJobsCount>)
    )
)]
#[axum::debug_handler]
pub async fn active_jobs_count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let active_jobs = state.job_service.get_active_jobs_count().await?;
    Ok(Json(ActiveJobsCount { active_jobs }))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job with its skill ids", body = Json<JobDetail>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_job(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    put,
    path = "/api/v1/jobs/{id}/status",
    params(
        ("id" = i64, Path, description = "Job ID"),
        ("new_status" = String, Query, description = "OPEN, PAUSED or CLOSED")
    ),
    responses(
        (status = 200, description = "Status changed", body = Json<Job>),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_job_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<JobStatusQuery>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    let job = state
        .job_service
        .update_job_status(id, query.new_status, recruiter.id, Some(user.id))
        .await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job removed"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let recruiter = state.profile_service.require_recruiter(&user).await?;
    state.job_service.remove_job(id, recruiter.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
