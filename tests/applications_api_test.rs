mod common;

use axum::http::StatusCode;
use common::{hyderabad_job, TestApp};
use job_portal_backend::models::application::Application;
use serde_json::json;

#[tokio::test]
async fn apply_then_hire_scenario() {
    let app = TestApp::new();
    let (_, owner) = app.recruiter("owner@example.com").await;
    let (_, rival) = app.recruiter("rival@example.com").await;
    let (seeker_id, seeker) = app.job_seeker("seeker@example.com").await;
    let job_id = app.post_job(&owner, hyderabad_job()).await;

    let (status, application) = app
        .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": job_id }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", application);
    assert_eq!(application["status"], "APPLIED");
    assert_eq!(application["job_seeker_id"], seeker_id);
    let application_id = application["id"].as_i64().unwrap();
    let status_uri = format!("/api/v1/applications/{}/status", application_id);

    let (status, body) = app
        .put(&status_uri, Some(&rival), json!({ "new_status": "HIRED" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "HTTP_ERROR");

    let (status, hired) = app
        .put(&status_uri, Some(&owner), json!({ "new_status": "HIRED" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hired["status"], "HIRED");

    let (_, mine) = app
        .get("/api/v1/applications/my/applications", Some(&seeker))
        .await;
    assert_eq!(mine[0]["status"], "HIRED");

    let (status, body) = app
        .put(&status_uri, Some(&rival), json!({ "new_status": "REJECTED" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{}", body);
    let stored: Application = app
        .state
        .application_service
        .get(application_id)
        .await
        .unwrap();
    assert_eq!(stored.status.to_string(), "HIRED");
}

#[tokio::test]
async fn one_application_per_job_and_seeker() {
    let app = TestApp::new();
    let (_, recruiter) = app.recruiter("recruiter@example.com").await;
    let (_, seeker) = app.job_seeker("seeker@example.com").await;
    let job_id = app.post_job(&recruiter, hyderabad_job()).await;

    let (status, _) = app
        .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": job_id }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    for _ in 0..3 {
        let (status, body) = app
            .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": job_id }))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_code"], "BUSINESS_ERROR");
    }

    let (status, for_job) = app
        .get(&format!("/api/v1/applications/job/{}", job_id), Some(&recruiter))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(for_job.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn applications_need_an_open_job_and_a_profile() {
    let app = TestApp::new();
    let (_, recruiter) = app.recruiter("recruiter@example.com").await;
    let (_, seeker) = app.job_seeker("seeker@example.com").await;
    let (_, bare) = app.user("bare@example.com", "JOB_SEEKER").await;
    let job_id = app.post_job(&recruiter, hyderabad_job()).await;

    let (status, _) = app
        .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": 9999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post("/api/v1/applications/", Some(&bare), json!({ "job_id": job_id }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(
            axum::http::Method::PUT,
            &format!("/api/v1/jobs/{}/status?new_status=CLOSED", job_id),
            Some(&recruiter),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": job_id }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "BUSINESS_ERROR");
}

#[tokio::test]
async fn job_applications_are_visible_to_the_owner_only() {
    let app = TestApp::new();
    let (_, owner) = app.recruiter("owner@example.com").await;
    let (_, rival) = app.recruiter("rival@example.com").await;
    let job_id = app.post_job(&owner, hyderabad_job()).await;

    let (status, _) = app
        .get(&format!("/api/v1/applications/job/{}", job_id), Some(&rival))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/v1/applications/", Some(&owner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, admin) = app.user("admin@example.com", "ADMIN").await;
    let (status, _) = app.get("/api/v1/applications/", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn interviews_follow_application_ownership() {
    let app = TestApp::new();
    let (_, owner) = app.recruiter("owner@example.com").await;
    let (_, rival) = app.recruiter("rival@example.com").await;
    let (_, seeker) = app.job_seeker("seeker@example.com").await;
    let job_id = app.post_job(&owner, hyderabad_job()).await;
    let (_, application) = app
        .post("/api/v1/applications/", Some(&seeker), json!({ "job_id": job_id }))
        .await;
    let schedule = json!({
        "application_id": application["id"],
        "interview_date": "2030-03-01T10:00:00Z",
        "mode": "ONLINE",
    });

    let (status, _) = app
        .post("/api/v1/interviews", Some(&rival), schedule.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, interview) = app.post("/api/v1/interviews", Some(&owner), schedule).await;
    assert_eq!(status, StatusCode::CREATED, "{}", interview);
    assert_eq!(interview["result"], "PENDING");

    let (status, updated) = app
        .put(
            &format!("/api/v1/interviews/{}", interview["id"]),
            Some(&owner),
            json!({ "result": "PASS" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["result"], "PASS");
    assert_eq!(updated["mode"], "ONLINE");

    let (status, listed) = app
        .get(
            &format!("/api/v1/applications/{}/interviews", application["id"]),
            Some(&owner),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
