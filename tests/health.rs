mod common;

use common::*;

#[tokio::test]
async fn health_returns_ok() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let (status, body) = get_text(&app, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, "skillbridge backend is up");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let ctx = TestContext::new().await;
    let app = ctx.app();

    let status = get_status(&app, "/nope").await;
    assert_eq!(status, 404);
}
