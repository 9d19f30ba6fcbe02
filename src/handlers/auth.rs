use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tokio::task;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::entities::user::{self, Role, StringList};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::auth::{
    Claims, LoginRequest, LoginResponse, MeResponse, MentorSignupRequest, RecruiterSignupRequest,
    SignupResponse, StudentSignupRequest,
};
use crate::state::AppState;
use crate::util::split_comma_list;

// ============================================================================
// Helpers
// ============================================================================

async fn hash_password(password: String) -> Result<String, AppError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| {
        error!("Thread pool error during password hashing: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .map_err(|e| {
        error!("Failed to hash password: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })
}

fn generate_access_token(
    email: &str,
    role: Role,
    secret: &str,
    expiry_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiry_seconds);

    let claims = Claims {
        sub: email.to_string(),
        role,
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })
}

async fn ensure_email_unused(state: &AppState, email: &str) -> Result<(), AppError> {
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during email lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if existing.is_some() {
        return Err(AppError::Conflict(String::from("Email already registered")));
    }
    Ok(())
}

fn comma_list(field: Option<&String>) -> StringList {
    field
        .map(|raw| split_comma_list(raw))
        .unwrap_or_default()
        .into()
}

fn base_user(name: String, email: String, password_hash: String, role: Role) -> user::ActiveModel {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        domains: Set(StringList::default()),
        skills: Set(StringList::default()),
        interests: Set(StringList::default()),
        career_goal: Set(None),
        points: Set(0),
        badges: Set(StringList::default()),
        expertise: Set(StringList::default()),
        experience_years: Set(0),
        available: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a student account
///
/// Creates a student with optional comma-delimited profile tag lists.
#[utoipa::path(
    post,
    path = "/auth/student/signup",
    request_body = StudentSignupRequest,
    responses(
        (status = 200, body = SignupResponse),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth",
)]
pub async fn student_signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<StudentSignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    info!("Student signup for email: {}", payload.email);

    ensure_email_unused(&state, &payload.email).await?;

    let hashed = hash_password(payload.password.clone()).await?;
    debug!("Password hashed, inserting student record");

    let mut new_user = base_user(
        payload.name.clone(),
        payload.email.clone(),
        hashed,
        Role::Student,
    );
    new_user.domains = Set(comma_list(payload.domains.as_ref()));
    new_user.skills = Set(comma_list(payload.skills.as_ref()));
    new_user.interests = Set(comma_list(payload.interests.as_ref()));

    let inserted = new_user.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert student: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!("Successfully registered student ID: {}", inserted.id);

    Ok(Json(SignupResponse {
        user_id: inserted.id,
        message: String::from("Student registered successfully"),
    }))
}

/// Register a mentor account
#[utoipa::path(
    post,
    path = "/auth/mentor/signup",
    request_body = MentorSignupRequest,
    responses(
        (status = 200, body = SignupResponse),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth",
)]
pub async fn mentor_signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<MentorSignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    info!("Mentor signup for email: {}", payload.email);

    ensure_email_unused(&state, &payload.email).await?;

    let hashed = hash_password(payload.password.clone()).await?;

    let mut new_user = base_user(
        payload.name.clone(),
        payload.email.clone(),
        hashed,
        Role::Mentor,
    );
    new_user.expertise = Set(comma_list(payload.expertise.as_ref()));
    new_user.experience_years = Set(payload.experience_years.unwrap_or(0));

    let inserted = new_user.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert mentor: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!("Successfully registered mentor ID: {}", inserted.id);

    Ok(Json(SignupResponse {
        user_id: inserted.id,
        message: String::from("Mentor registered successfully"),
    }))
}

/// Register a recruiter account
#[utoipa::path(
    post,
    path = "/auth/recruiter/signup",
    request_body = RecruiterSignupRequest,
    responses(
        (status = 200, body = SignupResponse),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth",
)]
pub async fn recruiter_signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RecruiterSignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    info!("Recruiter signup for email: {}", payload.email);

    ensure_email_unused(&state, &payload.email).await?;

    let hashed = hash_password(payload.password.clone()).await?;

    let new_user = base_user(
        payload.name.clone(),
        payload.email.clone(),
        hashed,
        Role::Recruiter,
    );

    let inserted = new_user.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert recruiter: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!("Successfully registered recruiter ID: {}", inserted.id);

    Ok(Json(SignupResponse {
        user_id: inserted.id,
        message: String::from("Recruiter registered successfully"),
    }))
}

/// Login with email and password
///
/// Returns a signed bearer token carrying the email and role claims.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth",
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    info!("Login attempt for email: {}", payload.email);

    let account = user::Entity::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during login lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| {
            info!("No account found for email: {}", payload.email);
            AppError::Unauthorized
        })?;

    let stored_hash = account.password_hash.clone();
    let verify_result = task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&stored_hash)?;
        Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
    })
    .await
    .map_err(|e| {
        error!("Thread pool error during password verification: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if verify_result.is_err() {
        info!("Invalid password for email: {}", payload.email);
        return Err(AppError::Unauthorized);
    }

    let access_token = generate_access_token(
        &account.email,
        account.role,
        &state.jwt.secret,
        state.jwt.access_token_expiry,
    )?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: String::from("bearer"),
        expires_in: state.jwt.access_token_expiry,
        role: account.role,
    }))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, body = MeResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "auth",
)]
pub async fn me(Extension(current_user): Extension<user::Model>) -> Json<MeResponse> {
    Json(MeResponse::from(current_user))
}
