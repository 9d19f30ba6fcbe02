use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::user::Role;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // email
    pub role: Role,
    pub exp: usize, // expiration (Unix timestamp)
    pub iat: usize, // issued at (Unix timestamp)
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StudentSignupRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Comma-delimited lists, e.g. "web, backend".
    pub domains: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MentorSignupRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Comma-delimited expertise areas.
    pub expertise: Option<String>,
    #[validate(range(min = 0, max = 60))]
    pub experience_years: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecruiterSignupRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub domains: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub career_goal: Option<String>,
    pub points: i32,
    pub badges: Vec<String>,
    pub expertise: Vec<String>,
    pub experience_years: i32,
    pub available: bool,
}

impl From<crate::entities::user::Model> for MeResponse {
    fn from(m: crate::entities::user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            role: m.role,
            domains: m.domains.0,
            skills: m.skills.0,
            interests: m.interests.0,
            career_goal: m.career_goal,
            points: m.points,
            badges: m.badges.0,
            expertise: m.expertise.0,
            experience_years: m.experience_years,
            available: m.available,
        }
    }
}
