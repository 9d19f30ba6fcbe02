use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::error;
use uuid::Uuid;

use crate::entities::user;
use crate::entities::{learning_progress, learning_resource};
use crate::errors::AppError;
use crate::models::learning::{
    ResourceFilter, ResourceView, ResourcesResponse, StreakResponse, TopicTrend, TrendsResponse,
};
use crate::services::matching;
use crate::state::AppState;

/// Browse learning resources
///
/// Optional topic and skill-level filters; results are ordered by tag
/// overlap with the user's interests, ties broken by view count.
#[utoipa::path(
    get,
    path = "/learning/resources",
    params(ResourceFilter),
    responses(
        (status = 200, body = ResourcesResponse),
    ),
    tag = "learning",
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Query(filter): Query<ResourceFilter>,
) -> Result<Json<ResourcesResponse>, AppError> {
    let mut query = learning_resource::Entity::find();
    if let Some(topic) = &filter.topic {
        query = query.filter(learning_resource::Column::Topic.eq(topic));
    }
    if let Some(level) = &filter.skill_level {
        query = query.filter(learning_resource::Column::SkillLevel.eq(level));
    }

    let resources = query.all(&state.db).await.map_err(|e| {
        error!("Database error during resource listing: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let interests = &current_user.interests.0;
    let mut scored: Vec<(learning_resource::Model, usize)> = resources
        .into_iter()
        .map(|r| {
            let score = matching::overlap_count(interests, &r.tags.0);
            (r, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.views.cmp(&a.0.views)));

    let total_found = scored.len();
    Ok(Json(ResourcesResponse {
        resources: scored
            .into_iter()
            .map(|(r, score)| ResourceView::from_model(r, score))
            .collect(),
        total_found,
    }))
}

/// Record a resource view
///
/// Bumps the shared popularity counter and logs a per-user progress row,
/// which feeds the streak and trend endpoints.
#[utoipa::path(
    post,
    path = "/learning/resources/{resource_id}/view",
    params(("resource_id" = Uuid, Path, description = "Resource identifier")),
    responses(
        (status = 200, body = ResourceView),
        (status = 404, description = "Resource not found"),
    ),
    tag = "learning",
)]
pub async fn view_resource(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(resource_id): Path<Uuid>,
) -> Result<Json<ResourceView>, AppError> {
    let resource = learning_resource::Entity::find_by_id(resource_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during resource lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Resource not found")))?;

    let views = resource.views + 1;
    let mut update: learning_resource::ActiveModel = resource.clone().into();
    update.views = Set(views);
    let updated = update.update(&state.db).await.map_err(|e| {
        error!("Failed to bump resource views: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    learning_progress::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(current_user.id),
        resource_id: Set(updated.id),
        viewed_at: Set(Utc::now()),
        completed: Set(true),
    }
    .insert(&state.db)
    .await
    .map_err(|e| {
        error!("Failed to record learning progress: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let score = matching::overlap_count(&current_user.interests.0, &updated.tags.0);
    Ok(Json(ResourceView::from_model(updated, score)))
}

/// Learning streak over the last thirty days
#[utoipa::path(
    get,
    path = "/learning/progress/streak",
    responses(
        (status = 200, body = StreakResponse),
    ),
    tag = "learning",
)]
pub async fn learning_streak(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<StreakResponse>, AppError> {
    let window_start = Utc::now() - Duration::days(30);
    let rows = learning_progress::Entity::find()
        .filter(learning_progress::Column::UserId.eq(current_user.id))
        .filter(learning_progress::Column::ViewedAt.gte(window_start))
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during progress listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let total_content_viewed = rows.len() as u64;
    let mut days: Vec<chrono::NaiveDate> = rows.iter().map(|r| r.viewed_at.date_naive()).collect();
    days.sort_unstable();
    days.dedup();
    let days_active_this_month = days.len() as u64;
    let current_streak = days_active_this_month.min(30);

    Ok(Json(StreakResponse {
        current_streak,
        days_active_this_month,
        total_content_viewed,
        message: format!("You're on a {current_streak} day learning streak!"),
    }))
}

/// Most-viewed topics over the last seven days
#[utoipa::path(
    get,
    path = "/learning/trends",
    responses(
        (status = 200, body = TrendsResponse),
    ),
    tag = "learning",
)]
pub async fn learning_trends(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<TrendsResponse>, AppError> {
    let window_start = Utc::now() - Duration::days(7);
    let recent = learning_progress::Entity::find()
        .filter(learning_progress::Column::UserId.eq(current_user.id))
        .filter(learning_progress::Column::ViewedAt.gte(window_start))
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during progress listing: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let mut topic_views: Vec<(String, u64)> = Vec::new();
    for row in &recent {
        let resource = learning_resource::Entity::find_by_id(row.resource_id)
            .one(&state.db)
            .await
            .map_err(|e| {
                error!("Database error during resource lookup: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;
        let Some(resource) = resource else { continue };
        match topic_views.iter_mut().find(|(t, _)| *t == resource.topic) {
            Some((_, count)) => *count += 1,
            None => topic_views.push((resource.topic, 1)),
        }
    }
    topic_views.sort_by(|a, b| b.1.cmp(&a.1));
    topic_views.truncate(3);

    Ok(Json(TrendsResponse {
        top_topics_this_week: topic_views
            .into_iter()
            .map(|(topic, views)| TopicTrend { topic, views })
            .collect(),
        total_content_viewed: recent.len(),
    }))
}
