pub mod auth;
pub mod catch_panic;
pub mod cors;
pub mod extract;
pub mod rate_limit;
pub mod request_log;
