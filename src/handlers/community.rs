use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::community::{self, MemberList, Post, PostList};
use crate::entities::user::{self, StringList};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::models::MessageResponse;
use crate::models::community::{
    CommunityDetail, CommunitySummary, CreateCommunityRequest, CreateCommunityResponse,
    CreatePostRequest, RecommendResponse,
};
use crate::services::matching::{self, COMMUNITY_RESULT_CAP};
use crate::state::AppState;
use crate::util::split_comma_list;

async fn find_community(state: &AppState, id: Uuid) -> Result<community::Model, AppError> {
    community::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during community lookup: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(String::from("Community not found")))
}

/// Create a community
#[utoipa::path(
    post,
    path = "/community/create",
    request_body = CreateCommunityRequest,
    responses(
        (status = 200, body = CreateCommunityResponse),
        (status = 409, description = "Name already taken"),
    ),
    tag = "community",
)]
pub async fn create_community(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    ValidJson(payload): ValidJson<CreateCommunityRequest>,
) -> Result<Json<CreateCommunityResponse>, AppError> {
    let existing = community::Entity::find()
        .filter(community::Column::Name.eq(&payload.name))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Database error during community name check: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if existing.is_some() {
        return Err(AppError::Conflict(String::from(
            "Community name already taken",
        )));
    }

    let tags: StringList = payload
        .tags
        .as_deref()
        .map(split_comma_list)
        .unwrap_or_default()
        .into();

    // The creator joins their own community.
    let new_community = community::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        topic: Set(payload.topic),
        tags: Set(tags),
        members: Set(MemberList(vec![current_user.id])),
        posts: Set(PostList::default()),
        created_by: Set(current_user.id),
        created_at: Set(Utc::now()),
    };

    let inserted = new_community.insert(&state.db).await.map_err(|e| {
        error!("Failed to insert community: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    info!("User {} created community {}", current_user.id, inserted.id);

    Ok(Json(CreateCommunityResponse {
        community_id: inserted.id,
        message: String::from("Community created successfully"),
    }))
}

/// Recommend communities
///
/// Ranks communities by tag overlap with the user's combined profile tags.
/// Users with no profile tags get a popularity-ordered fallback instead.
#[utoipa::path(
    get,
    path = "/community/recommend",
    responses(
        (status = 200, body = RecommendResponse),
    ),
    tag = "community",
)]
pub async fn recommend_communities(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
) -> Result<Json<RecommendResponse>, AppError> {
    let communities = community::Entity::find().all(&state.db).await.map_err(|e| {
        error!("Database error during community listing: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user_tags = current_user.profile_tags();

    if user_tags.is_empty() {
        let mut by_popularity = communities;
        by_popularity.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
        by_popularity.truncate(COMMUNITY_RESULT_CAP);

        return Ok(Json(RecommendResponse {
            communities: by_popularity
                .into_iter()
                .map(|c| CommunitySummary::from_model(c, 0))
                .collect(),
            popularity_fallback: true,
        }));
    }

    let candidates = communities.into_iter().map(|c| {
        let tags = c.tags.0.clone();
        (c, tags)
    });
    let ranked = matching::rank_by_overlap(&user_tags, candidates, COMMUNITY_RESULT_CAP);

    Ok(Json(RecommendResponse {
        communities: ranked
            .into_iter()
            .map(|m| CommunitySummary::from_model(m.item, m.score))
            .collect(),
        popularity_fallback: false,
    }))
}

/// Community detail with posts
#[utoipa::path(
    get,
    path = "/community/{community_id}",
    params(("community_id" = Uuid, Path, description = "Community identifier")),
    responses(
        (status = 200, body = CommunityDetail),
        (status = 404, description = "Community not found"),
    ),
    tag = "community",
)]
pub async fn community_detail(
    State(state): State<AppState>,
    Extension(_current_user): Extension<user::Model>,
    Path(community_id): Path<Uuid>,
) -> Result<Json<CommunityDetail>, AppError> {
    let community = find_community(&state, community_id).await?;
    Ok(Json(CommunityDetail::from(community)))
}

/// Join a community
///
/// Joining twice is a no-op; the member set never holds duplicates.
#[utoipa::path(
    post,
    path = "/community/{community_id}/join",
    params(("community_id" = Uuid, Path, description = "Community identifier")),
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 404, description = "Community not found"),
    ),
    tag = "community",
)]
pub async fn join_community(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(community_id): Path<Uuid>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    let community = find_community(&state, community_id).await?;

    if !community.members.contains(current_user.id) {
        let mut members = community.members.0.clone();
        members.push(current_user.id);

        let mut update: community::ActiveModel = community.into();
        update.members = Set(MemberList(members));
        update.update(&state.db).await.map_err(|e| {
            error!("Failed to update community members: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    Ok(Json(MessageResponse {
        message: String::from("Joined community"),
    }))
}

/// Leave a community
#[utoipa::path(
    post,
    path = "/community/{community_id}/leave",
    params(("community_id" = Uuid, Path, description = "Community identifier")),
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 404, description = "Community not found"),
    ),
    tag = "community",
)]
pub async fn leave_community(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(community_id): Path<Uuid>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    let community = find_community(&state, community_id).await?;

    if community.members.contains(current_user.id) {
        let members: Vec<Uuid> = community
            .members
            .0
            .iter()
            .copied()
            .filter(|id| *id != current_user.id)
            .collect();

        let mut update: community::ActiveModel = community.into();
        update.members = Set(MemberList(members));
        update.update(&state.db).await.map_err(|e| {
            error!("Failed to update community members: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    Ok(Json(MessageResponse {
        message: String::from("Left community"),
    }))
}

/// Post to a community
///
/// Members only; the post list is append-only.
#[utoipa::path(
    post,
    path = "/community/{community_id}/post",
    params(("community_id" = Uuid, Path, description = "Community identifier")),
    request_body = CreatePostRequest,
    responses(
        (status = 200, body = MessageResponse<String>),
        (status = 403, description = "Not a member"),
        (status = 404, description = "Community not found"),
    ),
    tag = "community",
)]
pub async fn post_to_community(
    State(state): State<AppState>,
    Extension(current_user): Extension<user::Model>,
    Path(community_id): Path<Uuid>,
    ValidJson(payload): ValidJson<CreatePostRequest>,
) -> Result<Json<MessageResponse<String>>, AppError> {
    let community = find_community(&state, community_id).await?;

    if !community.members.contains(current_user.id) {
        return Err(AppError::Forbidden(String::from(
            "Only members can post in this community",
        )));
    }

    let mut posts = community.posts.0.clone();
    posts.push(Post {
        author_id: current_user.id,
        author_name: current_user.name.clone(),
        content: payload.content,
        created_at: Utc::now(),
    });

    let mut update: community::ActiveModel = community.into();
    update.posts = Set(PostList(posts));
    update.update(&state.db).await.map_err(|e| {
        error!("Failed to append community post: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(MessageResponse {
        message: String::from("Post published"),
    }))
}
