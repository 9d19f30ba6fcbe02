#![allow(dead_code, unused_imports)]

mod db;
mod fixtures;
mod request;

pub use db::*;
pub use fixtures::*;
pub use request::*;

use axum::Router;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use skillbridge_backend::config::JwtConfig;
use skillbridge_backend::routes;
use skillbridge_backend::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Shared error response type for test assertions
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Test context containing all test infrastructure
pub struct TestContext {
    pub db: DatabaseConnection,
    pub state: AppState,
}

impl TestContext {
    /// Create a new test context with in-memory database
    pub async fn new() -> Self {
        let db = setup_test_db().await;

        let state = AppState::new(
            db.clone(),
            JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                access_token_expiry: 3600,
            },
        );

        Self { db, state }
    }

    pub fn app(&self) -> Router {
        routes::app_router(self.state.clone())
    }
}
