mod common;

use common::*;
use serde_json::json;
use skillbridge_backend::entities::quiz::Difficulty;
use skillbridge_backend::entities::user::Role;
use skillbridge_backend::models::auth::MeResponse;
use skillbridge_backend::models::quiz::AttemptResponse;
use skillbridge_backend::models::user::ProgressResponse;

#[tokio::test]
async fn profile_update_replaces_only_sent_fields() {
    let ctx = TestContext::new().await;
    let student = create_user(
        &ctx.db,
        "Profiled",
        "p@example.com",
        "password123",
        UserSpec {
            skills: vec!["Rust".to_string()],
            interests: vec!["AI".to_string()],
            ..Default::default()
        },
    )
    .await;
    let app = ctx.app();
    let token = auth_token(&student);

    let (status, me): (u16, MeResponse) = put_json_auth(
        &app,
        "/user/profile",
        &token,
        json!({"skills": "Go, SQL", "career_goal": "Platform engineer"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(me.skills, vec!["Go", "SQL"]);
    assert_eq!(me.interests, vec!["AI"]);
    assert_eq!(me.career_goal.as_deref(), Some("Platform engineer"));
}

#[tokio::test]
async fn progress_ranks_students_by_points() {
    let ctx = TestContext::new().await;
    create_user(
        &ctx.db,
        "Leader",
        "leader@example.com",
        "password123",
        UserSpec {
            points: 500,
            ..Default::default()
        },
    )
    .await;
    create_user(
        &ctx.db,
        "Runner Up",
        "runner@example.com",
        "password123",
        UserSpec {
            points: 200,
            ..Default::default()
        },
    )
    .await;
    let third = create_user(
        &ctx.db,
        "Third",
        "third@example.com",
        "password123",
        UserSpec {
            points: 100,
            badges: vec!["Rising Star".to_string()],
            ..Default::default()
        },
    )
    .await;
    let app = ctx.app();

    let (status, progress): (u16, ProgressResponse) =
        get_auth(&app, "/user/progress", &auth_token(&third)).await;
    assert_eq!(status, 200);
    assert_eq!(progress.current_rank, 3);
    assert_eq!(progress.badges_earned, 1);
    assert_eq!(progress.quiz_stats.total_quiz_attempts, 0);
    assert_eq!(progress.content_viewed, 0);
}

#[tokio::test]
async fn student_dashboard_collects_recent_activity() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Dash Quiz", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();
    let token = auth_token(&student);

    let (status, _): (u16, AttemptResponse) = post_json_auth(
        &app,
        &format!("/quiz/{}/attempt", quiz.id),
        &token,
        json!({
            "answers": [
                {"question_index": 0, "answer": "b"},
                {"question_index": 1, "answer": "b"}
            ],
            "time_taken": 60
        }),
    )
    .await;
    assert_eq!(status, 200);

    let (status, dashboard): (u16, serde_json::Value) =
        get_auth(&app, "/user/dashboard", &token).await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["name"], "Test Student");
    assert_eq!(dashboard["points"], 10);
    assert_eq!(dashboard["latest_quiz_attempts"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["leaderboard_rank"], 1);
}

#[tokio::test]
async fn mentor_dashboard_reports_availability_and_expertise() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    assert_eq!(mentor.role, Role::Mentor);
    let app = ctx.app();

    let (status, dashboard): (u16, serde_json::Value) =
        get_auth(&app, "/user/dashboard", &auth_token(&mentor)).await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["availability"], true);
    assert_eq!(dashboard["total_interviews_conducted"], 0);
    assert_eq!(
        dashboard["expertise"],
        serde_json::json!(["Rust", "SQL"])
    );
}

#[tokio::test]
async fn recruiter_dashboard_surfaces_top_talent() {
    let ctx = TestContext::new().await;
    create_user(
        &ctx.db,
        "Star Student",
        "star@example.com",
        "password123",
        UserSpec {
            points: 300,
            badges: vec!["Rising Star".to_string()],
            domains: vec!["Cloud".to_string()],
            skills: vec!["Rust".to_string()],
            ..Default::default()
        },
    )
    .await;
    create_user(
        &ctx.db,
        "Quiet Student",
        "quiet@example.com",
        "password123",
        UserSpec {
            points: 10,
            skills: vec!["SQL".to_string()],
            ..Default::default()
        },
    )
    .await;
    let recruiter = create_recruiter(&ctx.db, "r@example.com").await;
    let app = ctx.app();

    let (status, dashboard): (u16, serde_json::Value) =
        get_auth(&app, "/user/dashboard", &auth_token(&recruiter)).await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["total_students_viewed"], 2);

    let top = dashboard["top_talent"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Star Student");

    let skills = dashboard["skills_represented"].as_array().unwrap();
    assert!(skills.iter().any(|s| s == "Rust"));
    assert!(skills.iter().any(|s| s == "SQL"));
}
