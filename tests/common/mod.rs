#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use job_portal_backend::{
    cache::Cache, repositories::Store, routes,
    services::notification_service::NotificationService, utils::token::TokenKeys, AppState,
};
use serde_json::{json, Value as JsonValue};
use std::net::IpAddr;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_trusted_proxies(Vec::new())
    }

    pub fn with_trusted_proxies(proxies: Vec<IpAddr>) -> Self {
        let (store, _) = Store::in_memory();
        let state = AppState::new(
            store,
            Cache::in_memory(),
            NotificationService::spawn(vec![]),
            TokenKeys::new("test_secret_key", 60),
        )
        .with_trusted_proxies(proxies);
        Self {
            app: routes::app(state.clone()),
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, JsonValue) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, JsonValue) {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(
        &self,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        self.call(Method::PUT, uri, token, Some(body)).await
    }

    /// Registers through the service (the HTTP route is strictly rate
    /// limited) and returns the new user's id with a bearer token.
    pub async fn user(&self, email: &str, role: &str) -> (i64, String) {
        let payload = serde_json::from_value(json!({
            "email": email,
            "password": "password123",
            "role": role,
        }))
        .unwrap();
        let user = self.state.auth_service.register_user(payload).await.unwrap();
        let token = self.state.auth_service.issue_token(&user).unwrap();
        (user.id, token)
    }

    /// A recruiter account with a profile: (recruiter profile id, token).
    pub async fn recruiter(&self, email: &str) -> (i64, String) {
        let (user_id, token) = self.user(email, "RECRUITER").await;
        let (status, body) = self
            .post(
                "/api/v1/profiles/recruiters",
                Some(&token),
                json!({ "user_id": user_id, "company_name": "Acme Hiring" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        (body["id"].as_i64().unwrap(), token)
    }

    /// A job seeker account with a profile: (job seeker profile id, token).
    pub async fn job_seeker(&self, email: &str) -> (i64, String) {
        let (user_id, token) = self.user(email, "JOB_SEEKER").await;
        let (status, body) = self
            .post(
                "/api/v1/profiles/job-seekers",
                Some(&token),
                json!({ "user_id": user_id, "full_name": "Sam Seeker", "experience_years": 2 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        (body["id"].as_i64().unwrap(), token)
    }

    pub async fn post_job(&self, token: &str, body: JsonValue) -> i64 {
        let (status, job) = self.post("/api/v1/jobs/", Some(token), body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", job);
        job["id"].as_i64().unwrap()
    }
}

pub fn hyderabad_job() -> JsonValue {
    json!({
        "title": "Backend Engineer",
        "description": "Build and run the hiring platform APIs",
        "location": "Hyderabad",
        "salary_min": 600000,
        "salary_max": 900000,
        "job_type": "FULL_TIME",
    })
}
