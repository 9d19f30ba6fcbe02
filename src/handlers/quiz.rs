use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::quiz::QuestionList;
use crate::entities::user::Role;
use crate::entities::{quiz, quiz_attempt, user};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::quiz::{
    AttemptResponse, AttemptSummary, CreateQuizRequest, QuizDetail, QuizSummary,
    SubmitAttemptRequest,
};
use crate::services::{access, badges, scoring};
use crate::state::AppState;

async fn find_quiz(state: &AppState, quiz_id: Uuid) -> Result<quiz::Model, AppError> {
    quiz::Entity::find_by_id(quiz_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during quiz lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Quiz not found")))
}

/// Create a quiz
///
/// Mentor only. Point value and time limit are derived from the difficulty.
#[utoipa::path(
    post,
    path = "/quiz/create",
    request_body = CreateQuizRequest,
    responses(
        (status = 200, body = QuizSummary),
        (status = 403, description = "Not a mentor"),
    ),
    tag = "quiz",
)]
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<CreateQuizRequest>,
) -> Result<Json<QuizSummary>, AppError> {
    access::require_role(&current_user, Role::Mentor, "create quizzes")?;

    let question_count = payload.questions.len();
    let new_quiz = quiz::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        difficulty: Set(payload.difficulty),
        questions: Set(QuestionList(payload.questions)),
        points: Set(payload.difficulty.point_value()),
        time_limit: Set(payload.difficulty.time_limit(question_count)),
        created_by: Set(current_user.id),
        created_at: Set(Utc::now()),
    };

    let inserted = new_quiz.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!("Mentor {} created quiz {}", current_user.id, inserted.id);

    Ok(Json(QuizSummary::from(inserted)))
}

/// List available quizzes
///
/// Correct answers are never included in the listing.
#[utoipa::path(
    get,
    path = "/quiz/available",
    responses(
        (status = 200, body = Vec<QuizSummary>),
    ),
    tag = "quiz",
)]
pub async fn available_quizzes(
    State(state): State<AppState>,
    Extension(_current_user): Extension<user::Model>,
) -> Result<Json<Vec<QuizSummary>>, AppError> {
    let quizzes = quiz::Entity::find()
        .order_by_desc(quiz::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during quiz listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(quizzes.into_iter().map(QuizSummary::from).collect()))
}

/// Quiz detail with questions
///
/// Correct answers are stripped from the question list.
#[utoipa::path(
    get,
    path = "/quiz/{quiz_id}",
    params(("quiz_id" = Uuid, Path, description = "Quiz identifier")),
    responses(
        (status = 200, body = QuizDetail),
        (status = 404, description = "Quiz not found"),
    ),
    tag = "quiz",
)]
pub async fn quiz_detail(
    State(state): State<AppState>,
    Extension(_current_user): Extension<user::Model>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<QuizDetail>, AppError> {
    let quiz = find_quiz(&state, quiz_id).await?;
    Ok(Json(QuizDetail::from(quiz)))
}

/// Submit a quiz attempt
///
/// Scores the submission, applies time and tab-switch penalties, persists the
/// attempt, credits points and evaluates badge awards. The point and badge
/// updates are sequential writes; concurrent submissions for the same user
/// can race.
#[utoipa::path(
    post,
    path = "/quiz/{quiz_id}/attempt",
    params(("quiz_id" = Uuid, Path, description = "Quiz identifier")),
    request_body = SubmitAttemptRequest,
    responses(
        (status = 200, body = AttemptResponse),
        (status = 404, description = "Quiz not found"),
    ),
    tag = "quiz",
)]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(quiz_id): Path<Uuid>,
    ValidJson(payload): ValidJson<SubmitAttemptRequest>,
) -> Result<Json<AttemptResponse>, AppError> {
    let quiz = find_quiz(&state, quiz_id).await?;

    let score = scoring::score_attempt(
        &quiz.questions.0,
        quiz.difficulty,
        quiz.points,
        quiz.time_limit,
        &payload.answers,
        payload.time_taken,
        payload.tab_switches,
    );

    let attempt = quiz_attempt::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(current_user.id),
        quiz_id: Set(quiz.id),
        answers: Set(quiz_attempt::AnswerList(payload.answers)),
        correct_answers: Set(score.correct_answers),
        total_questions: Set(score.total_questions),
        score_percentage: Set(score.score_percentage),
        time_penalty: Set(score.time_penalty),
        tab_penalty: Set(score.tab_penalty),
        final_score: Set(score.final_score),
        points_earned: Set(score.points_earned),
        next_recommended_difficulty: Set(score.next_recommended_difficulty),
        created_at: Set(Utc::now()),
    };

    let inserted = attempt.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert quiz attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let attempt_count = quiz_attempt::Entity::find()
        .filter(quiz_attempt::Column::UserId.eq(current_user.id))
        .count(&state.db)
        .await
        .map_err(|e| {
            error!("Database error counting attempts: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let total_points = current_user.points + score.points_earned;
    let badges_earned = badges::quiz_badges(
        &current_user.badges,
        score.is_perfect(),
        attempt_count,
        total_points,
    );

    let mut updated_badges = current_user.badges.0.clone();
    updated_badges.extend(badges_earned.iter().cloned());

    let mut user_update: user::ActiveModel = current_user.clone().into();
    user_update.points = Set(total_points);
    user_update.badges = Set(updated_badges.into());
    user_update.updated_at = Set(Utc::now());
    user_update.update(&state.db).await.map_err(|e| {
        error!("Failed to update user after attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!(
        "User {} scored {:.1} on quiz {} (+{} points)",
        current_user.id, score.final_score, quiz.id, score.points_earned
    );

    Ok(Json(AttemptResponse {
        attempt_id: inserted.id,
        correct_answers: score.correct_answers,
        total_questions: score.total_questions,
        score_percentage: score.score_percentage,
        time_penalty: score.time_penalty,
        tab_penalty: score.tab_penalty,
        final_score: score.final_score,
        points_earned: score.points_earned,
        badges_earned,
        next_recommended_difficulty: score.next_recommended_difficulty,
        message: format!("You scored {:.1}%", score.final_score),
    }))
}

/// Current user's quiz attempts, newest first
#[utoipa::path(
    get,
    path = "/quiz/attempts/my",
    responses(
        (status = 200, body = Vec<AttemptSummary>),
    ),
    tag = "quiz",
)]
pub async fn my_attempts(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<Vec<AttemptSummary>>, AppError> {
    let attempts = quiz_attempt::Entity::find()
        .filter(quiz_attempt::Column::UserId.eq(current_user.id))
        .order_by_desc(quiz_attempt::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during attempt listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(
        attempts.into_iter().map(AttemptSummary::from).collect(),
    ))
}
