pub mod activity_service;
pub mod application_service;
pub mod auth_service;
pub mod interview_service;
pub mod job_service;
pub mod notification_service;
pub mod profile_service;
pub mod skill_service;
pub mod user_service;
