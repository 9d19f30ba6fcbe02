use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::mentor_session::{self, SessionStatus};
use crate::entities::user::{self, Role, StringList};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::MessageResponse;
use crate::models::mentor::{
    AvailableMentorsResponse, CareerExplorationResponse, CareerRecommendation,
    CompleteSessionRequest, CompleteSessionResponse, ConnectRequest, ConnectResponse, MentorMatch,
    MentorshipStats, SessionStatusFilter, SessionView,
};
use crate::services::matching::{self, MENTOR_RESULT_CAP};
use crate::services::{access, badges};
use crate::state::AppState;
use crate::util::split_delimited_list;

async fn find_session(state: &AppState, id: Uuid) -> Result<mentor_session::Model, AppError> {
    mentor_session::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during session lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Session not found")))
}

async fn available_mentor_pool(state: &AppState) -> Result<Vec<user::Model>, AppError> {
    user::Entity::find()
        .filter(user::Column::Role.eq(Role::Mentor))
        .filter(user::Column::Available.eq(true))
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during mentor listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })
}

/// Combined skills and domains, the source tag set for mentor matching.
fn student_match_tags(user: &user::Model) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in user.skills.0.iter().chain(user.domains.0.iter()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

async fn set_mentor_availability(
    state: &AppState,
    mentor_id: Uuid,
    available: bool,
) -> Result<(), AppError> {
    let mentor = user::Entity::find_by_id(mentor_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during mentor lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Mentor not found")))?;

    let mut update: user::ActiveModel = mentor.into();
    update.available = Set(available);
    update.updated_at = Set(Utc::now());
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to update mentor availability: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;
    Ok(())
}

/// Initiate a direct mentor connect
///
/// Students with five or more badges are matched to the best available
/// mentor by expertise overlap; that mentor's availability flag is cleared
/// until the session completes.
#[utoipa::path(
    post,
    path = "/mentor-interviews/connect",
    request_body = ConnectRequest,
    responses(
        (status = 200, body = ConnectResponse),
        (status = 403, description = "Not enough badges or not a student"),
        (status = 404, description = "No suitable mentor available"),
    ),
    tag = "mentor-interviews",
)]
pub async fn connect(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<ConnectRequest>,
) -> Result<Json<ConnectResponse>, AppError> {
    access::require_badge_count(
        &current_user,
        access::CONNECT_BADGE_THRESHOLD,
        "for direct mentor connect",
    )?;
    access::require_role(&current_user, Role::Student, "initiate mentor connects")?;

    let mentors = available_mentor_pool(&state).await?;
    let source_tags = student_match_tags(&current_user);

    let candidates = mentors.into_iter().map(|m| {
        let expertise = m.expertise.0.clone();
        (m, expertise)
    });
    let ranked = matching::rank_by_overlap(&source_tags, candidates, 1);

    let best = ranked.into_iter().next().ok_or_else(|| {
        AppError::NotFound(String::from(
            "No suitable mentors available for your skill set. Please schedule formal interviews instead.",
        ))
    })?;

    let mentor = best.item;
    let matched = matching::matched_tags(&source_tags, &mentor.expertise.0);

    let now = Utc::now();
    let session = mentor_session::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(current_user.id),
        student_name: Set(current_user.name.clone()),
        mentor_id: Set(mentor.id),
        mentor_name: Set(mentor.name.clone()),
        call_type: Set(payload.call_type.clone()),
        status: Set(SessionStatus::Initiated),
        matched_expertise: Set(StringList(matched.clone())),
        session_rating: Set(None),
        session_feedback: Set(None),
        key_takeaways: Set(StringList::default()),
        started_at: Set(None),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = session.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert mentor session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    // Hold the mentor until the session completes. This is a plain flag
    // write; two racing connects can both claim the same mentor.
    set_mentor_availability(&state, mentor.id, false).await?;

    info!(
        "Student {} connected to mentor {} (session {})",
        current_user.id, mentor.id, inserted.id
    );

    Ok(Json(ConnectResponse {
        session_id: inserted.id,
        mentor_name: mentor.name.clone(),
        matched_expertise: matched,
        call_type: payload.call_type,
        message: format!(
            "Direct connect initiated with mentor {}. They will be notified.",
            mentor.name
        ),
    }))
}

/// Start a mentor connect session
///
/// Either participant may start an initiated session.
#[utoipa::path(
    put,
    path = "/mentor-interviews/session/{session_id}/start",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 400, description = "Not in initiated state"),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Session not found"),
    ),
    tag = "mentor-interviews",
)]
pub async fn start_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    let session = find_session(&state, session_id).await?;

    if !session.is_participant(current_user.id) {
        return Err(AppError::Forbidden(String::from(
            "Not authorized for this session",
        )));
    }
    if session.status != SessionStatus::Initiated {
        return Err(AppError::BadRequest(String::from(
            "Session cannot be started",
        )));
    }

    let now = Utc::now();
    let mut update: mentor_session::ActiveModel = session.into();
    update.status = Set(SessionStatus::Active);
    update.started_at = Set(Some(now));
    update.updated_at = Set(now);
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to start session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(MessageResponse {
        message: String::from("Session started successfully"),
    }))
}

/// Complete a mentor connect session
///
/// Student only. Records the optional rating (clamped to 1-5) and feedback,
/// releases the mentor's availability and evaluates session badges.
#[utoipa::path(
    put,
    path = "/mentor-interviews/session/{session_id}/complete",
    params(("session_id" = Uuid, Path, description = "Session identifier")),
    request_body = CompleteSessionRequest,
    responses(
        (status = 200, body = CompleteSessionResponse),
        (status = 400, description = "Not in active state"),
        (status = 403, description = "Not the session's student"),
        (status = 404, description = "Session not found"),
    ),
    tag = "mentor-interviews",
)]
pub async fn complete_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(session_id): Path<Uuid>,
    ValidJson(payload): ValidJson<CompleteSessionRequest>,
) -> Result<Json<CompleteSessionResponse>, AppError> {
    let session = find_session(&state, session_id).await?;

    if current_user.role != Role::Student || session.student_id != current_user.id {
        return Err(AppError::Forbidden(String::from(
            "Only the session's student can complete it",
        )));
    }
    if session.status != SessionStatus::Active {
        return Err(AppError::BadRequest(String::from(
            "Only active sessions can be completed",
        )));
    }

    let rating = payload.rating.map(|r| r.clamp(1, 5));
    let takeaways = payload
        .key_takeaways
        .as_deref()
        .map(|raw| split_delimited_list(raw, ';'))
        .unwrap_or_default();
    let mentor_id = session.mentor_id;

    let now = Utc::now();
    let mut update: mentor_session::ActiveModel = session.into();
    update.status = Set(SessionStatus::Completed);
    update.session_rating = Set(rating);
    update.session_feedback = Set(payload.feedback);
    update.key_takeaways = Set(StringList(takeaways));
    update.completed_at = Set(Some(now));
    update.updated_at = Set(now);
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to complete session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    set_mentor_availability(&state, mentor_id, true).await?;

    let successful_sessions = mentor_session::Entity::find()
        .filter(mentor_session::Column::StudentId.eq(current_user.id))
        .filter(mentor_session::Column::Status.eq(SessionStatus::Completed))
        .filter(mentor_session::Column::SessionRating.gte(3))
        .count(&state.db)
        .await
        .map_err(|e| {
            error!("Database error counting sessions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let badges_earned = badges::session_badges(&current_user.badges, rating, successful_sessions);

    if !badges_earned.is_empty() {
        let mut updated = current_user.badges.0.clone();
        updated.extend(badges_earned.iter().cloned());

        let mut user_update: user::ActiveModel = current_user.into();
        user_update.badges = Set(updated.into());
        user_update.updated_at = Set(Utc::now());
        user_update.update(&state.db).await.map_err(|e| {
            error!("Failed to award session badges: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    Ok(Json(CompleteSessionResponse {
        message: String::from("Session completed successfully"),
        badges_earned,
    }))
}

/// Sessions the current user participates in
#[utoipa::path(
    get,
    path = "/mentor-interviews/my-sessions",
    params(SessionStatusFilter),
    responses(
        (status = 200, body = Vec<SessionView>),
    ),
    tag = "mentor-interviews",
)]
pub async fn my_sessions(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Query(filter): Query<SessionStatusFilter>,
) -> Result<Json<Vec<SessionView>>, AppError> {
    let mut query = mentor_session::Entity::find().filter(
        Condition::any()
            .add(mentor_session::Column::StudentId.eq(current_user.id))
            .add(mentor_session::Column::MentorId.eq(current_user.id)),
    );

    if let Some(status) = filter.status {
        query = query.filter(mentor_session::Column::Status.eq(status));
    }

    let sessions = query
        .order_by_desc(mentor_session::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during session listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(
        sessions
            .into_iter()
            .map(|s| SessionView::for_participant(s, current_user.id))
            .collect(),
    ))
}

/// Available mentors ranked by expertise match
#[utoipa::path(
    get,
    path = "/mentor-interviews/available-mentors",
    responses(
        (status = 200, body = AvailableMentorsResponse),
        (status = 403, description = "Not enough badges"),
    ),
    tag = "mentor-interviews",
)]
pub async fn available_mentors(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<AvailableMentorsResponse>, AppError> {
    access::require_badge_count(
        &current_user,
        access::CONNECT_BADGE_THRESHOLD,
        "for direct mentor connect",
    )?;

    let mentors = available_mentor_pool(&state).await?;
    let source_tags = student_match_tags(&current_user);

    let matches: Vec<MentorMatch> = if source_tags.is_empty() {
        // No profile tags: fall back to the most experienced mentors.
        let mut pool = mentors;
        pool.sort_by(|a, b| b.experience_years.cmp(&a.experience_years));
        pool.truncate(MENTOR_RESULT_CAP);
        pool.into_iter()
            .map(|m| MentorMatch {
                id: m.id,
                name: m.name,
                expertise: m.expertise.0,
                experience_years: m.experience_years,
                match_score: 0,
                skills_overlap: Vec::new(),
            })
            .collect()
    } else {
        let candidates = mentors.into_iter().map(|m| {
            let expertise = m.expertise.0.clone();
            (m, expertise)
        });
        matching::rank_by_overlap(&source_tags, candidates, MENTOR_RESULT_CAP)
            .into_iter()
            .map(|m| {
                let overlap = matching::matched_tags(&source_tags, &m.item.expertise.0);
                MentorMatch {
                    id: m.item.id,
                    name: m.item.name,
                    expertise: m.item.expertise.0,
                    experience_years: m.item.experience_years,
                    match_score: m.score,
                    skills_overlap: overlap,
                }
            })
            .collect()
    };

    Ok(Json(AvailableMentorsResponse {
        available_mentors: matches,
        your_badges_count: current_user.badge_count(),
        required_badges: access::CONNECT_BADGE_THRESHOLD,
    }))
}

/// Mentorship statistics for the current student
#[utoipa::path(
    get,
    path = "/mentor-interviews/stats/mentorship",
    responses(
        (status = 200, body = MentorshipStats),
        (status = 403, description = "Not a student"),
    ),
    tag = "mentor-interviews",
)]
pub async fn mentorship_stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<MentorshipStats>, AppError> {
    access::require_role(&current_user, Role::Student, "view mentorship stats")?;

    let completed = mentor_session::Entity::find()
        .filter(mentor_session::Column::StudentId.eq(current_user.id))
        .filter(mentor_session::Column::Status.eq(SessionStatus::Completed))
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during mentorship stats: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let ratings: Vec<i32> = completed.iter().filter_map(|s| s.session_rating).collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        f64::from(ratings.iter().sum::<i32>()) / ratings.len() as f64
    };

    let mut mentors: Vec<Uuid> = Vec::new();
    for session in &completed {
        if !mentors.contains(&session.mentor_id) {
            mentors.push(session.mentor_id);
        }
    }

    let badges_from_mentorship = current_user
        .badges
        .0
        .iter()
        .filter(|b| b.contains("Mentor"))
        .count();

    Ok(Json(MentorshipStats {
        total_sessions: completed.len() as u64,
        average_rating,
        mentors_connected: mentors.len(),
        badges_from_mentorship,
    }))
}

/// Career exploration recommendations
///
/// Unlocked once at least half of the apex badge list is earned. A static
/// catalog stands in for an external career-paths source; entries are ranked
/// by tag overlap with the user's interests and skills.
#[utoipa::path(
    get,
    path = "/mentor-interviews/recommend/career-exploration",
    responses(
        (status = 200, body = CareerExplorationResponse),
        (status = 403, description = "Not enough apex badges"),
    ),
    tag = "mentor-interviews",
)]
pub async fn career_exploration(
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<CareerExplorationResponse>, AppError> {
    let earned_apex = access::require_apex_badges(&current_user)?;

    let mut source_tags: Vec<String> = current_user.interests.0.clone();
    for tag in &current_user.skills.0 {
        if !source_tags.contains(tag) {
            source_tags.push(tag.clone());
        }
    }

    let catalog = career_catalog();
    let careers: Vec<CareerRecommendation> = catalog
        .into_iter()
        .map(|mut c| {
            c.match_score = matching::overlap_count(&source_tags, &c.required_skills);
            c
        })
        .collect();

    let mut ranked = careers;
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(5);

    Ok(Json(CareerExplorationResponse {
        unconventional_careers: ranked,
        earned_apex_badges: earned_apex,
        required_apex_badges: access::apex_badge_threshold(),
        message: String::from("Explore unconventional career paths tailored to your profile!"),
    }))
}

fn career_catalog() -> Vec<CareerRecommendation> {
    let entry = |title: &str, description: &str, skills: &[&str], growth: &str| {
        CareerRecommendation {
            title: title.to_string(),
            description: description.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            growth_potential: growth.to_string(),
            match_score: 0,
        }
    };

    vec![
        entry(
            "AI Ethics Consultant",
            "Guide the ethical development and deployment of AI systems",
            &["AI", "Ethics", "Policy"],
            "High",
        ),
        entry(
            "Sustainable Tech Innovator",
            "Develop technology solutions for environmental challenges",
            &["Sustainability", "Innovation", "Tech"],
            "Very High",
        ),
        entry(
            "Developer Advocate",
            "Bridge engineering teams and their developer communities",
            &["Communication", "Programming", "Writing"],
            "High",
        ),
        entry(
            "Data Storyteller",
            "Turn analytics into narratives that drive decisions",
            &["Data", "Visualization", "Communication"],
            "Medium",
        ),
        entry(
            "EdTech Product Designer",
            "Design learning products grounded in education research",
            &["Design", "Education", "UX"],
            "High",
        ),
    ]
}
