use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::community::{self, Post};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "topic must not be empty"))]
    pub topic: String,
    /// Comma-delimited tag list.
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunitySummary {
    pub id: Uuid,
    pub name: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub members_count: usize,
    /// Tag overlap with the requesting user; zero for popularity fallbacks.
    pub match_score: usize,
}

impl CommunitySummary {
    pub fn from_model(m: community::Model, match_score: usize) -> Self {
        Self {
            id: m.id,
            name: m.name,
            topic: m.topic,
            tags: m.tags.0,
            members_count: m.members.len(),
            match_score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityDetail {
    pub id: Uuid,
    pub name: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub members: Vec<Uuid>,
    pub posts: Vec<Post>,
}

impl From<community::Model> for CommunityDetail {
    fn from(m: community::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            topic: m.topic,
            tags: m.tags.0,
            members: m.members.0,
            posts: m.posts.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCommunityResponse {
    pub community_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendResponse {
    pub communities: Vec<CommunitySummary>,
    /// True when the user had no profile tags and popularity ordering was used.
    pub popularity_fallback: bool,
}
