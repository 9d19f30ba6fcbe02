use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::quiz::{Difficulty, Question};
use crate::entities::quiz_attempt::{self, SubmittedAnswer};

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, message = "a quiz needs at least one question"))]
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<SubmittedAnswer>,
    /// Elapsed time in seconds.
    #[validate(range(min = 0))]
    pub time_taken: i64,
    #[serde(default)]
    pub tab_switches: u32,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// A question as shown to a student: the correct answer is stripped.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            question: q.question,
            options: q.options,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizSummary {
    pub id: Uuid,
    pub title: String,
    pub difficulty: Difficulty,
    pub questions_count: usize,
    pub points: i32,
    pub time_limit: i32,
}

impl From<crate::entities::quiz::Model> for QuizSummary {
    fn from(m: crate::entities::quiz::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            difficulty: m.difficulty,
            questions_count: m.questions.0.len(),
            points: m.points,
            time_limit: m.time_limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizDetail {
    pub id: Uuid,
    pub title: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuestionView>,
    pub points: i32,
    pub time_limit: i32,
}

impl From<crate::entities::quiz::Model> for QuizDetail {
    fn from(m: crate::entities::quiz::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            difficulty: m.difficulty,
            questions: m.questions.0.into_iter().map(QuestionView::from).collect(),
            points: m.points,
            time_limit: m.time_limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttemptResponse {
    pub attempt_id: Uuid,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub score_percentage: f64,
    pub time_penalty: f64,
    pub tab_penalty: f64,
    pub final_score: f64,
    pub points_earned: i32,
    pub badges_earned: Vec<String>,
    pub next_recommended_difficulty: Difficulty,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttemptSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub final_score: f64,
    pub points_earned: i32,
    pub next_recommended_difficulty: Difficulty,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<quiz_attempt::Model> for AttemptSummary {
    fn from(m: quiz_attempt::Model) -> Self {
        Self {
            id: m.id,
            quiz_id: m.quiz_id,
            correct_answers: m.correct_answers,
            total_questions: m.total_questions,
            final_score: m.final_score,
            points_earned: m.points_earned,
            next_recommended_difficulty: m.next_recommended_difficulty,
            created_at: m.created_at,
        }
    }
}
