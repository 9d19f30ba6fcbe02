mod common;

use common::*;
use serde_json::json;
use skillbridge_backend::models::MessageResponse;
use skillbridge_backend::models::community::{
    CommunityDetail, CreateCommunityResponse, RecommendResponse,
};

async fn create_community(
    app: &axum::Router,
    token: &str,
    name: &str,
    tags: &str,
) -> CreateCommunityResponse {
    let (status, created): (u16, CreateCommunityResponse) = post_json_auth(
        app,
        "/community/create",
        token,
        json!({"name": name, "topic": "general", "tags": tags}),
    )
    .await;
    assert_eq!(status, 200);
    created
}

#[tokio::test]
async fn creator_joins_their_own_community() {
    let ctx = TestContext::new().await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let app = ctx.app();
    let token = auth_token(&student);

    let created = create_community(&app, &token, "Rustaceans", "Rust, Systems").await;

    let (status, detail): (u16, CommunityDetail) = get_auth(
        &app,
        &format!("/community/{}", created.community_id),
        &token,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(detail.members, vec![student.id]);
    assert_eq!(detail.tags, vec!["Rust", "Systems"]);
}

#[tokio::test]
async fn duplicate_community_name_is_rejected() {
    let ctx = TestContext::new().await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let app = ctx.app();
    let token = auth_token(&student);

    create_community(&app, &token, "Only One", "").await;

    let (status, err): (u16, ErrorResponse) = post_json_auth(
        &app,
        "/community/create",
        &token,
        json!({"name": "Only One", "topic": "general"}),
    )
    .await;
    assert_eq!(status, 409);
    assert!(err.message.contains("already taken"));
}

#[tokio::test]
async fn recommendations_rank_by_tag_overlap() {
    let ctx = TestContext::new().await;
    let creator = create_student(&ctx.db, "creator@example.com").await;
    let seeker = create_user(
        &ctx.db,
        "Seeker",
        "seeker@example.com",
        "password123",
        UserSpec {
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            interests: vec!["Data".to_string()],
            ..Default::default()
        },
    )
    .await;
    let app = ctx.app();
    let creator_token = auth_token(&creator);

    create_community(&app, &creator_token, "Rust and Data", "Rust, Data, SQL").await;
    create_community(&app, &creator_token, "Rust Only", "Rust").await;
    create_community(&app, &creator_token, "Gardening", "Plants").await;

    let (status, recs): (u16, RecommendResponse) =
        get_auth(&app, "/community/recommend", &auth_token(&seeker)).await;
    assert_eq!(status, 200);
    assert!(!recs.popularity_fallback);

    // Zero-overlap communities are dropped, best match first.
    assert_eq!(recs.communities.len(), 2);
    assert_eq!(recs.communities[0].name, "Rust and Data");
    assert_eq!(recs.communities[0].match_score, 3);
    assert_eq!(recs.communities[1].name, "Rust Only");
    assert_eq!(recs.communities[1].match_score, 1);
}

#[tokio::test]
async fn untagged_profile_gets_popularity_fallback() {
    let ctx = TestContext::new().await;
    let creator = create_student(&ctx.db, "creator@example.com").await;
    let blank = create_student(&ctx.db, "blank@example.com").await;
    let app = ctx.app();

    create_community(&app, &auth_token(&creator), "Somewhere", "Rust").await;

    let (status, recs): (u16, RecommendResponse) =
        get_auth(&app, "/community/recommend", &auth_token(&blank)).await;
    assert_eq!(status, 200);
    assert!(recs.popularity_fallback);
    assert_eq!(recs.communities.len(), 1);
    assert_eq!(recs.communities[0].match_score, 0);
}

#[tokio::test]
async fn joining_twice_keeps_a_single_membership() {
    let ctx = TestContext::new().await;
    let creator = create_student(&ctx.db, "creator@example.com").await;
    let joiner = create_student(&ctx.db, "joiner@example.com").await;
    let app = ctx.app();
    let joiner_token = auth_token(&joiner);

    let created = create_community(&app, &auth_token(&creator), "Join Me", "").await;
    let join_path = format!("/community/{}/join", created.community_id);

    for _ in 0..2 {
        let (status, _): (u16, MessageResponse<String>) =
            post_json_auth(&app, &join_path, &joiner_token, json!({})).await;
        assert_eq!(status, 200);
    }

    let (_, detail): (u16, CommunityDetail) = get_auth(
        &app,
        &format!("/community/{}", created.community_id),
        &joiner_token,
    )
    .await;
    assert_eq!(detail.members.len(), 2);
}

#[tokio::test]
async fn only_members_can_post() {
    let ctx = TestContext::new().await;
    let creator = create_student(&ctx.db, "creator@example.com").await;
    let outsider = create_student(&ctx.db, "outsider@example.com").await;
    let app = ctx.app();
    let creator_token = auth_token(&creator);

    let created = create_community(&app, &creator_token, "Members Club", "").await;
    let post_path = format!("/community/{}/post", created.community_id);

    let (status, err): (u16, ErrorResponse) = post_json_auth(
        &app,
        &post_path,
        &auth_token(&outsider),
        json!({"content": "hi"}),
    )
    .await;
    assert_eq!(status, 403);
    assert!(err.message.contains("members"));

    let (status, _): (u16, MessageResponse<String>) = post_json_auth(
        &app,
        &post_path,
        &creator_token,
        json!({"content": "first post"}),
    )
    .await;
    assert_eq!(status, 200);

    let (_, detail): (u16, CommunityDetail) = get_auth(
        &app,
        &format!("/community/{}", created.community_id),
        &creator_token,
    )
    .await;
    assert_eq!(detail.posts.len(), 1);
    assert_eq!(detail.posts[0].content, "first post");
    assert_eq!(detail.posts[0].author_id, creator.id);
}

#[tokio::test]
async fn leaving_removes_membership() {
    let ctx = TestContext::new().await;
    let creator = create_student(&ctx.db, "creator@example.com").await;
    let app = ctx.app();
    let token = auth_token(&creator);

    let created = create_community(&app, &token, "Ghost Town", "").await;

    let (status, _): (u16, MessageResponse<String>) = post_json_auth(
        &app,
        &format!("/community/{}/leave", created.community_id),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(status, 200);

    let (_, detail): (u16, CommunityDetail) = get_auth(
        &app,
        &format!("/community/{}", created.community_id),
        &token,
    )
    .await;
    assert!(detail.members.is_empty());
}
