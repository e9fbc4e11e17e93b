mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{hyderabad_job, TestApp};
use serde_json::json;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|job| job["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn hyderabad_search_scenario() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;
    let job_id = app.post_job(&token, hyderabad_job()).await;

    let (status, job) = app.get(&format!("/api/v1/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["status"], "OPEN");

    let (status, all) = app.get("/api/v1/jobs/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&all), vec![job_id]);

    let (_, hits) = app.get("/api/v1/jobs/search?location=hyder", None).await;
    assert_eq!(ids(&hits), vec![job_id]);

    let (_, misses) = app
        .get("/api/v1/jobs/search?location=hyder&min_salary=1000000", None)
        .await;
    assert!(ids(&misses).is_empty());

    let (status, closed) = app
        .call(
            Method::PUT,
            &format!("/api/v1/jobs/{}/status?new_status=CLOSED", job_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", closed);
    assert_eq!(closed["status"], "CLOSED");

    let (_, after) = app.get("/api/v1/jobs/search", None).await;
    assert!(ids(&after).is_empty());
    let (_, after) = app.get("/api/v1/jobs/search?location=hyder", None).await;
    assert!(ids(&after).is_empty());
}

#[tokio::test]
async fn detail_cache_follows_status_changes() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;
    let job_id = app.post_job(&token, hyderabad_job()).await;
    let detail = format!("/api/v1/jobs/{}", job_id);

    let (_, cached) = app.get(&detail, None).await;
    assert_eq!(cached["status"], "OPEN");

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/v1/jobs/{}/status?new_status=PAUSED", job_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fresh) = app.get(&detail, None).await;
    assert_eq!(fresh["status"], "PAUSED");
}

#[tokio::test]
async fn active_count_reflects_new_jobs() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;

    let (_, count) = app.get("/api/v1/jobs/stats/active-count", None).await;
    assert_eq!(count["active_jobs"], 0);

    app.post_job(&token, hyderabad_job()).await;
    let (_, count) = app.get("/api/v1/jobs/stats/active-count", None).await;
    assert_eq!(count["active_jobs"], 1);

    app.post_job(&token, hyderabad_job()).await;
    let (_, count) = app.get("/api/v1/jobs/stats/active-count", None).await;
    assert_eq!(count["active_jobs"], 2);
}

#[tokio::test]
async fn closed_jobs_stay_closed() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;
    let job_id = app.post_job(&token, hyderabad_job()).await;
    let status_uri = |s: &str| format!("/api/v1/jobs/{}/status?new_status={}", job_id, s);

    let (status, _) = app
        .call(Method::PUT, &status_uri("CLOSED"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(Method::PUT, &status_uri("OPEN"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "BUSINESS_ERROR");

    let (_, job) = app.get(&format!("/api/v1/jobs/{}", job_id), None).await;
    assert_eq!(job["status"], "CLOSED");
}

#[tokio::test]
async fn only_the_owner_changes_job_status() {
    let app = TestApp::new();
    let (_, owner) = app.recruiter("owner@example.com").await;
    let (_, rival) = app.recruiter("rival@example.com").await;
    let job_id = app.post_job(&owner, hyderabad_job()).await;

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v1/jobs/{}/status?new_status=CLOSED", job_id),
            Some(&rival),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "HTTP_ERROR");

    let (status, _) = app
        .call(
            Method::PUT,
            "/api/v1/jobs/9999/status?new_status=CLOSED",
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn job_creation_checks_role_and_skills() {
    let app = TestApp::new();
    let (_, seeker) = app.job_seeker("seeker@example.com").await;
    let (_, recruiter) = app.recruiter("recruiter@example.com").await;

    let (status, _) = app.post("/api/v1/jobs/", None, hyderabad_job()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post("/api/v1/jobs/", Some(&seeker), hyderabad_job()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut unknown_skill = hyderabad_job();
    unknown_skill["skill_ids"] = json!([404]);
    let (status, _) = app.post("/api/v1/jobs/", Some(&recruiter), unknown_skill).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, all) = app.get("/api/v1/jobs/", None).await;
    assert!(ids(&all).is_empty());

    let (status, skill) = app
        .post("/api/v1/skills", Some(&recruiter), json!({ "name": "Rust" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let skill_id = skill["id"].as_i64().unwrap();
    let mut with_skill = hyderabad_job();
    with_skill["skill_ids"] = json!([skill_id]);
    let job_id = app.post_job(&recruiter, with_skill).await;

    let (_, job) = app.get(&format!("/api/v1/jobs/{}", job_id), None).await;
    assert_eq!(job["skill_ids"], json!([skill_id]));
}

#[tokio::test]
async fn inverted_salary_range_is_rejected() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;
    let mut job = hyderabad_job();
    job["salary_min"] = json!(900000);
    job["salary_max"] = json!(600000);

    let (status, body) = app.post("/api/v1/jobs/", Some(&token), job).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "HTTP_ERROR");
}

#[tokio::test]
async fn recruiters_list_and_remove_their_jobs() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;
    let first = app.post_job(&token, hyderabad_job()).await;
    let second = app.post_job(&token, hyderabad_job()).await;

    let (status, mine) = app.get("/api/v1/jobs/my/jobs", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&mine), vec![first, second]);

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/v1/jobs/{}", first),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, mine) = app.get("/api/v1/jobs/my/jobs", Some(&token)).await;
    assert_eq!(ids(&mine), vec![second]);
    let (status, _) = app.get(&format!("/api/v1/jobs/{}", first), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, count) = app.get("/api/v1/jobs/stats/active-count", None).await;
    assert_eq!(count["active_jobs"], 1);
}

#[tokio::test]
async fn search_is_rate_limited_per_client() {
    let app = TestApp::new();
    for _ in 0..30 {
        let (status, _) = app.get("/api/v1/jobs/search", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get("/api/v1/jobs/search", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["detail"]["limit"], 30);
    assert_eq!(body["detail"]["window_seconds"], 60);

    let (status, _) = app.get("/api/v1/jobs/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_input_gets_the_error_envelope() {
    let app = TestApp::new();
    let (_, token) = app.recruiter("recruiter@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/jobs/")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "HTTP_ERROR");
    assert!(body["detail"].is_string());

    let mut job = hyderabad_job();
    job.as_object_mut().unwrap().remove("title");
    let (status, body) = app.post("/api/v1/jobs/", Some(&token), job).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "HTTP_ERROR");

    let job_id = app.post_job(&token, hyderabad_job()).await;
    let uri = format!("/api/v1/jobs/{}/status?new_status=BOGUS", job_id);
    let (status, body) = app.call(Method::PUT, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "HTTP_ERROR");

    let (status, body) = app.get("/api/v1/jobs/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "HTTP_ERROR");
}
