use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    dto::profile_dto::{
        AddSkillPayload, CreateJobSeekerPayload, CreateRecruiterPayload, UpdateJobSeekerPayload,
        UpdateRecruiterPayload,
    },
    error::Result,
    middleware::{
        auth::CurrentUser,
        extract::{Json, Path},
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/profiles/recruiters",
    request_body = CreateRecruiterPayload,
    responses(
        (status = 201, description = "Recruiter profile created", body = Json<Recruiter>),
        (status = 403, description = "Creating a profile for another user"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Profile already exists for this user")
    )
)]
#[axum::debug_handler]
pub async fn create_recruiter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateRecruiterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .create_recruiter(&user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/recruiters/{id}",
    params(
        ("id" = i64, Path, description = "Recruiter profile ID")
    ),
    responses(
        (status = 200, description = "Recruiter profile", body = Json<Recruiter>),
        (status = 404, description = "Recruiter profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_recruiter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_recruiter(id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/recruiters/user/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Recruiter profile", body = Json<Recruiter>),
        (status = 404, description = "Recruiter profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_recruiter_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_recruiter_by_user(user_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/v1/profiles/recruiters/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID owning the profile")
    ),
    request_body = UpdateRecruiterPayload,
    responses(
        (status = 200, description = "Recruiter profile updated", body = Json<Recruiter>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Recruiter profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_recruiter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateRecruiterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .update_recruiter(&user, user_id, payload)
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/v1/profiles/job-seekers",
    request_body = CreateJobSeekerPayload,
    responses(
        (status = 201, description = "Job seeker profile created", body = Json<JobSeeker>),
        (status = 403, description = "Creating a profile for another user"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Profile already exists for this user")
    )
)]
#[axum::debug_handler]
pub async fn create_job_seeker(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateJobSeekerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .create_job_seeker(&user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/job-seekers/{id}",
    params(
        ("id" = i64, Path, description = "Job seeker profile ID")
    ),
    responses(
        (status = 200, description = "Job seeker profile", body = Json<JobSeeker>),
        (status = 404, description = "Job seeker profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job_seeker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_job_seeker(id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/job-seekers/user/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Job seeker profile", body = Json<JobSeeker>),
        (status = 404, description = "Job seeker profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job_seeker_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_job_seeker_by_user(user_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/v1/profiles/job-seekers/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID owning the profile")
    ),
    request_body = UpdateJobSeekerPayload,
    responses(
        (status = 200, description = "Job seeker profile updated", body = Json<JobSeeker>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job seeker profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job_seeker(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateJobSeekerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .update_job_seeker(&user, user_id, payload)
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/v1/profiles/job-seekers/{id}/skills",
    params(
        ("id" = i64, Path, description = "Job seeker profile ID")
    ),
    request_body = AddSkillPayload,
    responses(
        (status = 201, description = "Skill recorded", body = Json<JobSeekerSkill>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Profile or skill not found")
    )
)]
#[axum::debug_handler]
pub async fn add_job_seeker_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AddSkillPayload>,
) -> Result<impl IntoResponse> {
    let link = state
        .profile_service
        .add_skill(&user, id, payload.skill_id, payload.proficiency_level)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/job-seekers/{id}/skills",
    params(
        ("id" = i64, Path, description = "Job seeker profile ID")
    ),
    responses(
        (status = 200, description = "Skills with proficiency", body = Json<Vec<JobSeekerSkill>>),
        (status = 404, description = "Job seeker profile not found")
    )
)]
#[axum::debug_handler]
pub async fn list_job_seeker_skills(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let skills = state.profile_service.skills(id).await?;
    Ok(Json(skills))
}
