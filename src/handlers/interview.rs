use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::interview::{self, InterviewStatus};
use crate::entities::user::{self, Role};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::MessageResponse;
use crate::models::interview::{
    CompleteInterviewRequest, CompleteInterviewResponse, InterviewStats, ScheduleInterviewRequest,
    ScheduleInterviewResponse, StatusFilter,
};
use crate::services::access;
use crate::state::AppState;

async fn find_interview(state: &AppState, id: Uuid) -> Result<interview::Model, AppError> {
    interview::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during interview lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Interview not found")))
}

fn apply_status_filter(
    query: Select<interview::Entity>,
    status: Option<InterviewStatus>,
) -> Select<interview::Entity> {
    match status {
        Some(status) => query.filter(interview::Column::Status.eq(status)),
        None => query,
    }
}

/// Schedule a mock interview
///
/// Requires at least three badges. The mentor must exist.
#[utoipa::path(
    post,
    path = "/interview/schedule",
    request_body = ScheduleInterviewRequest,
    responses(
        (status = 200, body = ScheduleInterviewResponse),
        (status = 403, description = "Not enough badges"),
        (status = 404, description = "Mentor not found"),
    ),
    tag = "interview",
)]
pub async fn schedule_interview(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<ScheduleInterviewRequest>,
) -> Result<Json<ScheduleInterviewResponse>, AppError> {
    access::require_badge_count(
        &current_user,
        access::INTERVIEW_BADGE_THRESHOLD,
        "to schedule interviews",
    )?;

    let mentor = user::Entity::find_by_id(payload.mentor_id)
        .filter(user::Column::Role.eq(Role::Mentor))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during mentor lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Mentor not found")))?;

    let now = Utc::now();
    let new_interview = interview::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(current_user.id),
        student_name: Set(current_user.name.clone()),
        mentor_id: Set(mentor.id),
        mentor_name: Set(mentor.name.clone()),
        scheduled_time: Set(payload.scheduled_time),
        topic: Set(payload.topic),
        difficulty: Set(payload.difficulty),
        status: Set(InterviewStatus::Scheduled),
        score: Set(None),
        feedback: Set(None),
        strengths: Set(None),
        improvements: Set(None),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = new_interview.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert interview: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!(
        "Student {} scheduled interview {} with mentor {}",
        current_user.id, inserted.id, mentor.id
    );

    Ok(Json(ScheduleInterviewResponse {
        interview_id: inserted.id,
        mentor_name: mentor.name,
        scheduled_time: inserted.scheduled_time,
        message: String::from("Mock interview scheduled successfully"),
    }))
}

/// Current user's interviews as a student
#[utoipa::path(
    get,
    path = "/interview/my-interviews",
    params(StatusFilter),
    responses(
        (status = 200, body = Vec<interview::Model>),
    ),
    tag = "interview",
)]
pub async fn my_interviews(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<interview::Model>>, AppError> {
    let query = apply_status_filter(
        interview::Entity::find().filter(interview::Column::StudentId.eq(current_user.id)),
        filter.status,
    );

    let interviews = query
        .order_by_desc(interview::Column::ScheduledTime)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during interview listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(interviews))
}

/// Interviews assigned to the current mentor
#[utoipa::path(
    get,
    path = "/interview/mentor/interviews",
    params(StatusFilter),
    responses(
        (status = 200, body = Vec<interview::Model>),
        (status = 403, description = "Not a mentor"),
    ),
    tag = "interview",
)]
pub async fn mentor_interviews(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<interview::Model>>, AppError> {
    access::require_role(&current_user, Role::Mentor, "access this listing")?;

    let query = apply_status_filter(
        interview::Entity::find().filter(interview::Column::MentorId.eq(current_user.id)),
        filter.status,
    );

    let interviews = query
        .order_by_desc(interview::Column::ScheduledTime)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during interview listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(interviews))
}

/// Complete an interview
///
/// Assigned mentor only, scheduled interviews only. Records score and
/// feedback, then evaluates interview badges for the student.
#[utoipa::path(
    put,
    path = "/interview/{interview_id}/complete",
    params(("interview_id" = Uuid, Path, description = "Interview identifier")),
    request_body = CompleteInterviewRequest,
    responses(
        (status = 200, body = CompleteInterviewResponse),
        (status = 400, description = "Not in scheduled state"),
        (status = 403, description = "Not the assigned mentor"),
        (status = 404, description = "Interview not found"),
    ),
    tag = "interview",
)]
pub async fn complete_interview(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(interview_id): Path<Uuid>,
    ValidJson(payload): ValidJson<CompleteInterviewRequest>,
) -> Result<Json<CompleteInterviewResponse>, AppError> {
    access::require_role(&current_user, Role::Mentor, "complete interviews")?;

    let interview = find_interview(&state, interview_id).await?;

    if interview.mentor_id != current_user.id {
        return Err(AppError::Forbidden(String::from("Not your interview")));
    }
    if interview.status != InterviewStatus::Scheduled {
        return Err(AppError::BadRequest(String::from(
            "Only scheduled interviews can be completed",
        )));
    }

    let student_id = interview.student_id;
    let now = Utc::now();

    let mut update: interview::ActiveModel = interview.into();
    update.status = Set(InterviewStatus::Completed);
    update.score = Set(Some(payload.score));
    update.feedback = Set(Some(payload.feedback));
    update.strengths = Set(payload.strengths);
    update.improvements = Set(payload.improvements);
    update.completed_at = Set(Some(now));
    update.updated_at = Set(now);
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to complete interview: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    // Badge evaluation runs against the student's record.
    let student = user::Entity::find_by_id(student_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during student lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Student not found")))?;

    let completed_count = interview::Entity::find()
        .filter(interview::Column::StudentId.eq(student_id))
        .filter(interview::Column::Status.eq(InterviewStatus::Completed))
        .count(&state.db)
        .await
        .map_err(|e| {
            error!("Database error counting completed interviews: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let badges_earned =
        crate::services::badges::interview_badges(&student.badges, payload.score, completed_count);

    if !badges_earned.is_empty() {
        let mut badges = student.badges.0.clone();
        badges.extend(badges_earned.iter().cloned());

        let mut student_update: user::ActiveModel = student.into();
        student_update.badges = Set(badges.into());
        student_update.updated_at = Set(Utc::now());
        student_update.update(&state.db).await.map_err(|e| {
            error!("Failed to award interview badges: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    Ok(Json(CompleteInterviewResponse {
        message: String::from("Interview completed successfully"),
        score: payload.score,
        badges_earned,
    }))
}

/// Interview detail
///
/// Visible only to the two participants.
#[utoipa::path(
    get,
    path = "/interview/{interview_id}",
    params(("interview_id" = Uuid, Path, description = "Interview identifier")),
    responses(
        (status = 200, body = interview::Model),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Interview not found"),
    ),
    tag = "interview",
)]
pub async fn interview_detail(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<interview::Model>, AppError> {
    let interview = find_interview(&state, interview_id).await?;

    if interview.student_id != current_user.id && interview.mentor_id != current_user.id {
        return Err(AppError::Forbidden(String::from(
            "Not authorized to view this interview",
        )));
    }

    Ok(Json(interview))
}

/// Cancel a scheduled interview
///
/// Assigned student only; completed or cancelled interviews stay as they are.
#[utoipa::path(
    delete,
    path = "/interview/{interview_id}",
    params(("interview_id" = Uuid, Path, description = "Interview identifier")),
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 400, description = "Not in scheduled state"),
        (status = 403, description = "Not the assigned student"),
        (status = 404, description = "Interview not found"),
    ),
    tag = "interview",
)]
pub async fn cancel_interview(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    let interview = find_interview(&state, interview_id).await?;

    if interview.student_id != current_user.id {
        return Err(AppError::Forbidden(String::from(
            "Can only cancel your own interviews",
        )));
    }
    if interview.status != InterviewStatus::Scheduled {
        return Err(AppError::BadRequest(String::from(
            "Can only cancel scheduled interviews",
        )));
    }

    let mut update: interview::ActiveModel = interview.into();
    update.status = Set(InterviewStatus::Cancelled);
    update.updated_at = Set(Utc::now());
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to cancel interview: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(MessageResponse {
        message: String::from("Interview cancelled successfully"),
    }))
}

/// Interview performance statistics for the current student
#[utoipa::path(
    get,
    path = "/interview/stats/performance",
    responses(
        (status = 200, body = InterviewStats),
    ),
    tag = "interview",
)]
pub async fn interview_stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<InterviewStats>, AppError> {
    let interviews = interview::Entity::find()
        .filter(interview::Column::StudentId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Completed))
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during interview stats: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let scores: Vec<f64> = interviews.iter().filter_map(|i| i.score).collect();
    let mut topics: Vec<String> = Vec::new();
    for interview in &interviews {
        if !topics.contains(&interview.topic) {
            topics.push(interview.topic.clone());
        }
    }

    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    let highest_score = scores.iter().copied().fold(0.0, f64::max);

    Ok(Json(InterviewStats {
        total_interviews: interviews.len() as u64,
        average_score,
        highest_score,
        topics_covered: topics,
    }))
}
