#![allow(dead_code, unused_imports)]

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use skillbridge_backend::entities::quiz::{self, Difficulty, Question, QuestionList};
use skillbridge_backend::entities::user::{self, Role, StringList};
use skillbridge_backend::models::auth::Claims;

use super::TEST_JWT_SECRET;

/// Test user fixture
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String, // Plain text for testing
    pub role: Role,
}

pub struct UserSpec {
    pub role: Role,
    pub domains: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub points: i32,
    pub badges: Vec<String>,
    pub expertise: Vec<String>,
    pub experience_years: i32,
    pub available: bool,
}

impl Default for UserSpec {
    fn default() -> Self {
        Self {
            role: Role::Student,
            domains: Vec::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            points: 0,
            badges: Vec::new(),
            expertise: Vec::new(),
            experience_years: 0,
            available: false,
        }
    }
}

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash test password")
        .to_string()
}

/// Creates a user row directly in the database
pub async fn create_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    spec: UserSpec,
) -> TestUser {
    let now = Utc::now();
    let role = spec.role;
    let user_model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)),
        role: Set(spec.role),
        domains: Set(StringList(spec.domains)),
        skills: Set(StringList(spec.skills)),
        interests: Set(StringList(spec.interests)),
        career_goal: Set(None),
        points: Set(spec.points),
        badges: Set(StringList(spec.badges)),
        expertise: Set(StringList(spec.expertise)),
        experience_years: Set(spec.experience_years),
        available: Set(spec.available),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = user_model
        .insert(db)
        .await
        .expect("Failed to create test user");

    TestUser {
        id: inserted.id,
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

pub async fn create_student(db: &DatabaseConnection, email: &str) -> TestUser {
    create_user(db, "Test Student", email, "password123", UserSpec::default()).await
}

pub async fn create_mentor(db: &DatabaseConnection, email: &str) -> TestUser {
    create_user(
        db,
        "Test Mentor",
        email,
        "password123",
        UserSpec {
            role: Role::Mentor,
            expertise: vec!["Rust".to_string(), "SQL".to_string()],
            experience_years: 5,
            available: true,
            ..Default::default()
        },
    )
    .await
}

pub async fn create_recruiter(db: &DatabaseConnection, email: &str) -> TestUser {
    create_user(
        db,
        "Test Recruiter",
        email,
        "password123",
        UserSpec {
            role: Role::Recruiter,
            ..Default::default()
        },
    )
    .await
}

/// Issues a bearer token for a fixture user, signed with the test secret
pub fn auth_token(user: &TestUser) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user.email.clone(),
        role: user.role,
        exp: (now + Duration::seconds(3600)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Inserts a two-question quiz whose correct answer is "b" for both questions
pub async fn create_two_question_quiz(
    db: &DatabaseConnection,
    title: &str,
    difficulty: Difficulty,
    created_by: Uuid,
) -> quiz::Model {
    let questions = vec![
        Question {
            question: "First question".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: "b".to_string(),
        },
        Question {
            question: "Second question".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: "b".to_string(),
        },
    ];

    quiz::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        difficulty: Set(difficulty),
        questions: Set(QuestionList(questions)),
        points: Set(difficulty.point_value()),
        time_limit: Set(difficulty.time_limit(2)),
        created_by: Set(created_by),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to create test quiz")
}
