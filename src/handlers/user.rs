use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::error;
use uuid::Uuid;

use crate::entities::interview::{self, InterviewStatus};
use crate::entities::learning_progress;
use crate::entities::mentor_connection::{self, ConnectionStatus};
use crate::entities::user::{self, Role};
use crate::entities::{community, quiz_attempt};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::MessageResponse;
use crate::models::auth::MeResponse;
use crate::models::quiz::AttemptSummary;
use crate::models::user::{
    CommunityMembership, ConnectionRequestPayload, ConnectionRequestResponse,
    ConnectionRequestView, DashboardResponse, InterviewProgress, MenteeSummary, MentorDashboard,
    ProgressResponse, QuizStats, RecruiterDashboard, StudentDashboard, TalentProfile,
    UpcomingInterview, UpdateProfileRequest,
};
use crate::services::access;
use crate::state::AppState;
use crate::util::split_comma_list;

fn db_err(context: &str) -> impl FnOnce(sea_orm::DbErr) -> AppError + '_ {
    move |e| {
        error!("Database error during {context}: {:?}", e);
        AppError::InternalServerError(e.to_string())
    }
}

/// Leaderboard position among students, by points. Ties share a rank.
async fn leaderboard_rank(state: &AppState, points: i32) -> Result<u64, AppError> {
    let ahead = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Student))
        .filter(user::Column::Points.gt(points))
        .count(&state.db)
        .await
        .map_err(db_err("leaderboard rank"))?;
    Ok(ahead + 1)
}

async fn joined_communities(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<community::Model>, AppError> {
    // Membership lives in a JSON column, so filtering happens here rather
    // than in the query.
    let all = community::Entity::find()
        .all(&state.db)
        .await
        .map_err(db_err("community membership scan"))?;
    Ok(all
        .into_iter()
        .filter(|c| c.members.contains(user_id))
        .collect())
}

/// Update the current user's profile tags
///
/// Omitted fields are left unchanged; list fields take comma-delimited input.
#[utoipa::path(
    put,
    path = "/user/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, body = MeResponse),
    ),
    tag = "user",
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let mut update: user::ActiveModel = current_user.into();

    if let Some(raw) = payload.domains.as_deref() {
        update.domains = Set(split_comma_list(raw).into());
    }
    if let Some(raw) = payload.skills.as_deref() {
        update.skills = Set(split_comma_list(raw).into());
    }
    if let Some(raw) = payload.interests.as_deref() {
        update.interests = Set(split_comma_list(raw).into());
    }
    if let Some(goal) = payload.career_goal {
        update.career_goal = Set(Some(goal));
    }
    update.updated_at = Set(Utc::now());

    let updated = update
        .update(&state.db)
        .await
        .map_err(db_err("profile update"))?;

    Ok(Json(MeResponse::from(updated)))
}

/// Progress summary for the current user
#[utoipa::path(
    get,
    path = "/user/progress",
    responses(
        (status = 200, body = ProgressResponse),
    ),
    tag = "user",
)]
pub async fn progress(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<ProgressResponse>, AppError> {
    let attempts = quiz_attempt::Entity::find()
        .filter(quiz_attempt::Column::UserId.eq(current_user.id))
        .all(&state.db)
        .await
        .map_err(db_err("attempt listing"))?;

    let total_quiz_attempts = attempts.len() as u64;
    let average_score = if attempts.is_empty() {
        0.0
    } else {
        attempts.iter().map(|a| a.final_score).sum::<f64>() / attempts.len() as f64
    };
    let best_score = attempts.iter().map(|a| a.final_score).fold(0.0, f64::max);

    let total_completed = interview::Entity::find()
        .filter(interview::Column::StudentId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Completed))
        .count(&state.db)
        .await
        .map_err(db_err("interview count"))?;

    let upcoming = interview::Entity::find()
        .filter(interview::Column::StudentId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Scheduled))
        .count(&state.db)
        .await
        .map_err(db_err("interview count"))?;

    let communities_joined = joined_communities(&state, current_user.id).await?.len() as u64;
    let content_viewed = learning_progress::Entity::find()
        .filter(learning_progress::Column::UserId.eq(current_user.id))
        .count(&state.db)
        .await
        .map_err(db_err("progress count"))?;
    let current_rank = leaderboard_rank(&state, current_user.points).await?;

    Ok(Json(ProgressResponse {
        quiz_stats: QuizStats {
            total_quiz_attempts,
            average_score,
            best_score,
        },
        interview_stats: InterviewProgress {
            total_completed,
            upcoming,
        },
        communities_joined,
        content_viewed,
        badges_earned: current_user.badge_count(),
        current_rank,
    }))
}

/// Request a connection to a specific mentor
///
/// One request per student-mentor pair; the mentor must be available.
#[utoipa::path(
    post,
    path = "/user/connect/mentor",
    request_body = ConnectionRequestPayload,
    responses(
        (status = 200, body = ConnectionRequestResponse),
        (status = 400, description = "A request to this mentor already exists"),
        (status = 404, description = "Mentor not found or unavailable"),
    ),
    tag = "user",
)]
pub async fn request_mentor_connection(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<ConnectionRequestPayload>,
) -> Result<Json<ConnectionRequestResponse>, AppError> {
    let mentor = user::Entity::find_by_id(payload.mentor_id)
        .filter(user::Column::Role.eq(Role::Mentor))
        .filter(user::Column::Available.eq(true))
        .one(&state.db)
        .await
        .map_err(db_err("mentor lookup"))?
        .ok_or_else(|| AppError::NotFound(String::from("Mentor not found or unavailable")))?;

    let existing = mentor_connection::Entity::find()
        .filter(mentor_connection::Column::StudentId.eq(current_user.id))
        .filter(mentor_connection::Column::MentorId.eq(mentor.id))
        .one(&state.db)
        .await
        .map_err(db_err("connection lookup"))?;
    if existing.is_some() {
        return Err(AppError::BadRequest(String::from(
            "Connection request already exists",
        )));
    }

    let connection = mentor_connection::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(current_user.id),
        student_name: Set(current_user.name.clone()),
        mentor_id: Set(mentor.id),
        mentor_name: Set(mentor.name.clone()),
        status: Set(ConnectionStatus::Pending),
        message: Set(payload.message),
        student_skills: Set(current_user.skills.clone()),
        student_badges: Set(current_user.badges.clone()),
        created_at: Set(Utc::now()),
        responded_at: Set(None),
    }
    .insert(&state.db)
    .await
    .map_err(db_err("connection insert"))?;

    Ok(Json(ConnectionRequestResponse {
        connection_id: connection.id,
        message: String::from("Connection request sent to mentor"),
    }))
}

/// Incoming connection requests for the current mentor, newest first
#[utoipa::path(
    get,
    path = "/user/mentor/connection-requests",
    responses(
        (status = 200, body = Vec<ConnectionRequestView>),
        (status = 403, description = "Caller is not a mentor"),
    ),
    tag = "user",
)]
pub async fn connection_requests(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<Vec<ConnectionRequestView>>, AppError> {
    access::require_role(&current_user, Role::Mentor, "view connection requests")?;

    let requests = mentor_connection::Entity::find()
        .filter(mentor_connection::Column::MentorId.eq(current_user.id))
        .order_by_desc(mentor_connection::Column::CreatedAt)
        .limit(20)
        .all(&state.db)
        .await
        .map_err(db_err("connection listing"))?;

    Ok(Json(
        requests.into_iter().map(ConnectionRequestView::from).collect(),
    ))
}

/// Accept or reject a connection request
#[utoipa::path(
    put,
    path = "/user/mentor/connection-request/{request_id}/{action}",
    params(
        ("request_id" = Uuid, Path, description = "Connection request identifier"),
        ("action" = String, Path, description = "Either accept or reject"),
    ),
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 400, description = "Unknown action"),
        (status = 403, description = "Not the receiving mentor"),
        (status = 404, description = "Connection request not found"),
    ),
    tag = "user",
)]
pub async fn respond_to_connection(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path((request_id, action)): Path<(Uuid, String)>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    access::require_role(&current_user, Role::Mentor, "respond to connection requests")?;

    let status = match action.as_str() {
        "accept" => ConnectionStatus::Accepted,
        "reject" => ConnectionStatus::Rejected,
        _ => return Err(AppError::BadRequest(String::from("Invalid action"))),
    };

    let request = mentor_connection::Entity::find_by_id(request_id)
        .one(&state.db)
        .await
        .map_err(db_err("connection lookup"))?
        .ok_or_else(|| AppError::NotFound(String::from("Connection request not found")))?;

    if request.mentor_id != current_user.id {
        return Err(AppError::Forbidden(String::from("Not your request")));
    }

    let mut update: mentor_connection::ActiveModel = request.into();
    update.status = Set(status);
    update.responded_at = Set(Some(Utc::now()));
    update
        .update(&state.db)
        .await
        .map_err(db_err("connection update"))?;

    let verb = match status {
        ConnectionStatus::Accepted => "accepted",
        _ => "rejected",
    };
    Ok(Json(MessageResponse {
        message: format!("Connection request {verb}"),
    }))
}

/// Role-specific dashboard
///
/// The payload shape depends on the caller's role.
#[utoipa::path(
    get,
    path = "/user/dashboard",
    responses(
        (status = 200, body = DashboardResponse),
    ),
    tag = "user",
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<DashboardResponse>, AppError> {
    let payload = match current_user.role {
        Role::Student => DashboardResponse::Student(student_dashboard(&state, current_user).await?),
        Role::Mentor => DashboardResponse::Mentor(mentor_dashboard(&state, current_user).await?),
        Role::Recruiter => {
            DashboardResponse::Recruiter(recruiter_dashboard(&state, current_user).await?)
        }
    };
    Ok(Json(payload))
}

async fn student_dashboard(
    state: &AppState,
    current_user: user::Model,
) -> Result<StudentDashboard, AppError> {
    let latest_quiz_attempts: Vec<AttemptSummary> = quiz_attempt::Entity::find()
        .filter(quiz_attempt::Column::UserId.eq(current_user.id))
        .order_by_desc(quiz_attempt::Column::CreatedAt)
        .limit(5)
        .all(&state.db)
        .await
        .map_err(db_err("attempt listing"))?
        .into_iter()
        .map(AttemptSummary::from)
        .collect();

    let upcoming_interviews: Vec<UpcomingInterview> = interview::Entity::find()
        .filter(interview::Column::StudentId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Scheduled))
        .order_by_asc(interview::Column::ScheduledTime)
        .all(&state.db)
        .await
        .map_err(db_err("interview listing"))?
        .into_iter()
        .map(|i| UpcomingInterview {
            id: i.id,
            mentor_name: i.mentor_name,
            scheduled_time: i.scheduled_time,
            topic: i.topic,
        })
        .collect();

    let community_memberships: Vec<CommunityMembership> =
        joined_communities(state, current_user.id)
            .await?
            .into_iter()
            .map(|c| CommunityMembership {
                id: c.id,
                name: c.name,
                topic: c.topic,
                members_count: c.members.len(),
            })
            .collect();

    let leaderboard_rank = leaderboard_rank(state, current_user.points).await?;

    Ok(StudentDashboard {
        name: current_user.name,
        points: current_user.points,
        badges: current_user.badges.0,
        domains: current_user.domains.0,
        skills: current_user.skills.0,
        interests: current_user.interests.0,
        latest_quiz_attempts,
        upcoming_interviews,
        community_memberships,
        leaderboard_rank,
    })
}

async fn mentor_dashboard(
    state: &AppState,
    current_user: user::Model,
) -> Result<MentorDashboard, AppError> {
    let total_interviews_conducted = interview::Entity::find()
        .filter(interview::Column::MentorId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Completed))
        .count(&state.db)
        .await
        .map_err(db_err("interview count"))?;

    let upcoming_sessions = interview::Entity::find()
        .filter(interview::Column::MentorId.eq(current_user.id))
        .filter(interview::Column::Status.eq(InterviewStatus::Scheduled))
        .count(&state.db)
        .await
        .map_err(db_err("interview count"))?;

    let recent = interview::Entity::find()
        .filter(interview::Column::MentorId.eq(current_user.id))
        .order_by_desc(interview::Column::CreatedAt)
        .limit(20)
        .all(&state.db)
        .await
        .map_err(db_err("interview listing"))?;

    let mut mentee_ids: Vec<Uuid> = Vec::new();
    for i in &recent {
        if !mentee_ids.contains(&i.student_id) {
            mentee_ids.push(i.student_id);
        }
    }
    mentee_ids.truncate(5);

    let mut recent_mentees = Vec::with_capacity(mentee_ids.len());
    for id in mentee_ids {
        let Some(student) = user::Entity::find_by_id(id)
            .one(&state.db)
            .await
            .map_err(db_err("mentee lookup"))?
        else {
            continue;
        };
        let quiz_attempts = quiz_attempt::Entity::find()
            .filter(quiz_attempt::Column::UserId.eq(id))
            .count(&state.db)
            .await
            .map_err(db_err("attempt count"))?;
        let badges = student.badge_count();
        recent_mentees.push(MenteeSummary {
            id: student.id,
            name: student.name,
            points: student.points,
            badges,
            quiz_attempts,
        });
    }

    Ok(MentorDashboard {
        name: current_user.name,
        expertise: current_user.expertise.0,
        experience_years: current_user.experience_years,
        availability: current_user.available,
        total_interviews_conducted,
        upcoming_sessions,
        recent_mentees,
    })
}

async fn recruiter_dashboard(
    state: &AppState,
    _current_user: user::Model,
) -> Result<RecruiterDashboard, AppError> {
    let students = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Student))
        .all(&state.db)
        .await
        .map_err(db_err("student listing"))?;

    let total_students_viewed = students.len();
    let mut domains_represented: Vec<String> = Vec::new();
    let mut skills_represented: Vec<String> = Vec::new();

    let mut profiles = Vec::with_capacity(students.len());
    for student in students {
        for d in &student.domains.0 {
            if !domains_represented.contains(d) {
                domains_represented.push(d.clone());
            }
        }
        for s in &student.skills.0 {
            if !skills_represented.contains(s) {
                skills_represented.push(s.clone());
            }
        }

        let quiz_attempts = quiz_attempt::Entity::find()
            .filter(quiz_attempt::Column::UserId.eq(student.id))
            .count(&state.db)
            .await
            .map_err(db_err("attempt count"))?;
        let completed_interviews = interview::Entity::find()
            .filter(interview::Column::StudentId.eq(student.id))
            .filter(interview::Column::Status.eq(InterviewStatus::Completed))
            .count(&state.db)
            .await
            .map_err(db_err("interview count"))?;

        profiles.push(TalentProfile {
            id: student.id,
            name: student.name,
            email: student.email,
            points: student.points,
            badges: student.badges.0,
            domains: student.domains.0,
            skills: student.skills.0,
            quiz_attempts,
            completed_interviews,
        });
    }

    profiles.sort_by(|a, b| b.activity_score().cmp(&a.activity_score()));
    profiles.truncate(10);

    Ok(RecruiterDashboard {
        total_students_viewed,
        top_talent: profiles,
        domains_represented,
        skills_represented,
    })
}
