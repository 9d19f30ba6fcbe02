mod common;

use common::*;
use serde_json::json;
use skillbridge_backend::models::auth::{LoginResponse, MeResponse, SignupResponse};

#[tokio::test]
async fn student_signup_and_login() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let (status, signup): (u16, SignupResponse) = post_json(
        &app,
        "/auth/student/signup",
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "password": "password123",
            "domains": "Web Development, Cloud",
            "skills": "Rust, SQL",
            "interests": "Open Source"
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert!(!signup.message.is_empty());

    let (status, login): (u16, LoginResponse) = post_json(
        &app,
        "/auth/login",
        json!({"email": "asha@example.com", "password": "password123"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(login.token_type, "bearer");
    assert!(!login.access_token.is_empty());

    let (status, me): (u16, MeResponse) = get_auth(&app, "/auth/me", &login.access_token).await;
    assert_eq!(status, 200);
    assert_eq!(me.email, "asha@example.com");
    assert_eq!(me.domains, vec!["Web Development", "Cloud"]);
    assert_eq!(me.skills, vec!["Rust", "SQL"]);
    assert_eq!(me.points, 0);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let body = json!({
        "name": "First",
        "email": "dup@example.com",
        "password": "password123"
    });

    let (status, _): (u16, SignupResponse) =
        post_json(&app, "/auth/student/signup", body.clone()).await;
    assert_eq!(status, 200);

    let (status, err): (u16, ErrorResponse) = post_json(
        &app,
        "/auth/mentor/signup",
        json!({
            "name": "Second",
            "email": "dup@example.com",
            "password": "password123"
        }),
    )
    .await;
    assert_eq!(status, 409);
    assert!(err.message.contains("Email already registered"));
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let ctx = TestContext::new().await;
    create_student(&ctx.db, "login@example.com").await;
    let app = ctx.app();

    let (status, _): (u16, ErrorResponse) = post_json(
        &app,
        "/auth/login",
        json!({"email": "login@example.com", "password": "not-the-password"}),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn mentor_signup_records_expertise() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let (status, _): (u16, SignupResponse) = post_json(
        &app,
        "/auth/mentor/signup",
        json!({
            "name": "Mentor Mo",
            "email": "mo@example.com",
            "password": "password123",
            "expertise": "Rust, Kubernetes",
            "experience_years": 8
        }),
    )
    .await;
    assert_eq!(status, 200);

    let (_, login): (u16, LoginResponse) = post_json(
        &app,
        "/auth/login",
        json!({"email": "mo@example.com", "password": "password123"}),
    )
    .await;

    let (status, me): (u16, MeResponse) = get_auth(&app, "/auth/me", &login.access_token).await;
    assert_eq!(status, 200);
    assert_eq!(me.expertise, vec!["Rust", "Kubernetes"]);
    assert_eq!(me.experience_years, 8);
    assert!(me.available);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let (status, _): (u16, serde_json::Value) = post_json(
        &app,
        "/auth/student/signup",
        json!({
            "name": "Shorty",
            "email": "short@example.com",
            "password": "short"
        }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn protected_route_requires_token() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let status = get_status(&app, "/auth/me").await;
    assert_eq!(status, 401);
}
