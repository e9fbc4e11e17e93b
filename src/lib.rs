pub mod cache;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::net::IpAddr;
use std::sync::Arc;

use crate::cache::Cache;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use crate::repositories::Store;
use crate::services::{
    activity_service::ActivityService, application_service::ApplicationService,
    auth_service::AuthService, interview_service::InterviewService, job_service::JobService,
    notification_service::NotificationService, profile_service::ProfileService,
    skill_service::SkillService, user_service::UserService,
};
use crate::utils::token::TokenKeys;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cache: Cache,
    pub activity_service: ActivityService,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub profile_service: ProfileService,
    pub skill_service: SkillService,
    pub interview_service: InterviewService,
    pub default_limiter: RateLimiter,
    pub strict_limiter: RateLimiter,
    pub search_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        store: Store,
        cache: Cache,
        notifications: NotificationService,
        keys: TokenKeys,
    ) -> Self {
        let activity_service = ActivityService::new(store.activity_logs.clone());
        let auth_service = AuthService::new(
            store.clone(),
            keys,
            activity_service.clone(),
            notifications.clone(),
        );
        let user_service = UserService::new(store.clone());
        let job_service = JobService::new(store.clone(), cache.clone(), activity_service.clone());
        let application_service = ApplicationService::new(
            store.clone(),
            activity_service.clone(),
            notifications.clone(),
        );
        let profile_service = ProfileService::new(store.clone(), notifications.clone());
        let skill_service = SkillService::new(store.clone());
        let interview_service =
            InterviewService::new(store.clone(), activity_service.clone(), notifications);

        let counters = cache.store();
        Self {
            default_limiter: RateLimiter::new(counters.clone(), RateLimitConfig::DEFAULT),
            strict_limiter: RateLimiter::new(counters.clone(), RateLimitConfig::STRICT),
            search_limiter: RateLimiter::new(counters, RateLimitConfig::SEARCH),
            store,
            cache,
            activity_service,
            auth_service,
            user_service,
            job_service,
            application_service,
            profile_service,
            skill_service,
            interview_service,
        }
    }

    /// Lets every limiter read the client address from `X-Forwarded-For`
    /// when the request comes from one of these peers.
    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        let proxies: Arc<[IpAddr]> = Arc::from(proxies);
        self.default_limiter = self.default_limiter.with_trusted_proxies(proxies.clone());
        self.strict_limiter = self.strict_limiter.with_trusted_proxies(proxies.clone());
        self.search_limiter = self.search_limiter.with_trusted_proxies(proxies);
        self
    }
}
