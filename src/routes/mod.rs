pub mod applications;
pub mod auth;
pub mod health;
pub mod interviews;
pub mod jobs;
pub mod profiles;
pub mod skills;
pub mod users;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{
    catch_panic::catch_panics, cors::permissive_cors, rate_limit::rate_limit_middleware,
    request_log,
};
use crate::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Every versioned route runs behind the default limiter; login and
/// registration add the strict one and search adds its own.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let auth_api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login/access-token", post(auth::login_access_token))
        .route_layer(from_fn_with_state(
            state.strict_limiter.clone(),
            rate_limit_middleware,
        ));

    let search = Router::new()
        .route("/jobs/search", get(jobs::search_jobs))
        .route_layer(from_fn_with_state(
            state.search_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::read_user_me).put(users::update_user_me))
        .route("/users/:id", get(users::get_user))
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/my/jobs", get(jobs::my_jobs))
        .route("/jobs/stats/active-count", get(jobs::active_jobs_count))
        .route("/jobs/:id", get(jobs::get_job).delete(jobs::delete_job))
        .route("/jobs/:id/status", put(jobs::update_job_status))
        .route(
            "/applications",
            get(applications::list_applications).post(applications::apply_to_job),
        )
        .route(
            "/applications/",
            get(applications::list_applications).post(applications::apply_to_job),
        )
        .route(
            "/applications/my/applications",
            get(applications::my_applications),
        )
        .route(
            "/applications/job/:job_id",
            get(applications::job_applications),
        )
        .route(
            "/applications/:id/status",
            put(applications::update_application_status),
        )
        .route(
            "/applications/:id/interviews",
            get(applications::application_interviews),
        )
        .route("/profiles/recruiters", post(profiles::create_recruiter))
        .route(
            "/profiles/recruiters/user/:user_id",
            get(profiles::get_recruiter_by_user),
        )
        .route(
            "/profiles/recruiters/:id",
            get(profiles::get_recruiter).put(profiles::update_recruiter),
        )
        .route("/profiles/job-seekers", post(profiles::create_job_seeker))
        .route(
            "/profiles/job-seekers/user/:user_id",
            get(profiles::get_job_seeker_by_user),
        )
        .route(
            "/profiles/job-seekers/:id",
            get(profiles::get_job_seeker).put(profiles::update_job_seeker),
        )
        .route(
            "/profiles/job-seekers/:id/skills",
            get(profiles::list_job_seeker_skills).post(profiles::add_job_seeker_skill),
        )
        .route("/skills", get(skills::list_skills).post(skills::create_skill))
        .route(
            "/interviews",
            get(interviews::list_interviews).post(interviews::schedule_interview),
        )
        .route("/interviews/:id", put(interviews::update_interview))
        .merge(auth_api)
        .merge(search)
        .layer(from_fn_with_state(
            state.default_limiter.clone(),
            rate_limit_middleware,
        ))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, api_router(&state))
        .layer(catch_panics())
        .layer(axum::middleware::from_fn(request_log::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(permissive_cors())
        .with_state(state)
}
