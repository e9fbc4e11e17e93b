mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn one_profile_per_user() {
    let app = TestApp::new();
    let (user_id, token) = app.user("recruiter@example.com", "RECRUITER").await;
    let body = json!({ "user_id": user_id, "company_name": "Acme Hiring" });

    let (status, profile) = app
        .post("/api/v1/profiles/recruiters", Some(&token), body.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, conflict) = app
        .post("/api/v1/profiles/recruiters", Some(&token), body)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["detail"], "Profile already exists for this user");

    let (status, by_user) = app
        .get(&format!("/api/v1/profiles/recruiters/user/{}", user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_user["id"], profile["id"]);
}

#[tokio::test]
async fn profiles_for_other_users_need_admin() {
    let app = TestApp::new();
    let (target_id, _) = app.user("target@example.com", "JOB_SEEKER").await;
    let (_, stranger) = app.user("stranger@example.com", "JOB_SEEKER").await;
    let (_, admin) = app.user("admin@example.com", "ADMIN").await;
    let body = json!({ "user_id": target_id, "full_name": "Tara Target" });

    let (status, _) = app
        .post("/api/v1/profiles/job-seekers", Some(&stranger), body.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/api/v1/profiles/job-seekers", Some(&admin), body)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/v1/profiles/job-seekers",
            Some(&admin),
            json!({ "user_id": 9999, "full_name": "Nobody" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn job_seeker_profiles_update_partially() {
    let app = TestApp::new();
    let (profile_id, token) = app.job_seeker("seeker@example.com").await;
    let (_, profile) = app
        .get(&format!("/api/v1/profiles/job-seekers/{}", profile_id), None)
        .await;
    let user_id = profile["user_id"].as_i64().unwrap();

    let (status, updated) = app
        .put(
            &format!("/api/v1/profiles/job-seekers/{}", user_id),
            Some(&token),
            json!({ "education": "B.Tech" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["education"], "B.Tech");
    assert_eq!(updated["full_name"], "Sam Seeker");
    assert_eq!(updated["experience_years"], 2);

    let (_, other) = app.user("other@example.com", "JOB_SEEKER").await;
    let (status, _) = app
        .put(
            &format!("/api/v1/profiles/job-seekers/{}", user_id),
            Some(&other),
            json!({ "education": "None" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn job_seeker_skills_are_upserted() {
    let app = TestApp::new();
    let (profile_id, token) = app.job_seeker("seeker@example.com").await;
    let (_, skill) = app
        .post("/api/v1/skills", Some(&token), json!({ "name": "Rust" }))
        .await;
    let (status, _) = app
        .post("/api/v1/skills", Some(&token), json!({ "name": "Rust" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let skills_uri = format!("/api/v1/profiles/job-seekers/{}/skills", profile_id);
    for level in ["BEGINNER", "ADVANCED"] {
        let (status, _) = app
            .post(
                &skills_uri,
                Some(&token),
                json!({ "skill_id": skill["id"], "proficiency_level": level }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listed) = app.get(&skills_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["proficiency_level"], "ADVANCED");

    let (status, all) = app.get("/api/v1/skills", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}
