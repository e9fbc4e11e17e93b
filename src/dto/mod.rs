pub mod application_dto;
pub mod auth_dto;
pub mod common;
pub mod job_dto;
pub mod profile_dto;
