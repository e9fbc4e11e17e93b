pub mod activity_log;
pub mod application;
pub mod interview;
pub mod job;
pub mod profile;
pub mod skill;
pub mod user;
