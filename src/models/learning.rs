use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::learning_resource;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResourceFilter {
    pub topic: Option<String>,
    pub skill_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceView {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub skill_level: String,
    pub resource_type: String,
    pub url: String,
    pub tags: Vec<String>,
    pub views: i32,
    /// Tag overlap with the requesting user's interests.
    pub match_score: usize,
}

impl ResourceView {
    pub fn from_model(m: learning_resource::Model, match_score: usize) -> Self {
        Self {
            id: m.id,
            title: m.title,
            topic: m.topic,
            skill_level: m.skill_level,
            resource_type: m.resource_type,
            url: m.url,
            tags: m.tags.0,
            views: m.views,
            match_score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceView>,
    pub total_found: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StreakResponse {
    /// Days of the rolling 30-day window with at least one view, capped at 30.
    pub current_streak: u64,
    pub days_active_this_month: u64,
    pub total_content_viewed: u64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicTrend {
    pub topic: String,
    pub views: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrendsResponse {
    /// Up to three most-viewed topics over the last seven days.
    pub top_topics_this_week: Vec<TopicTrend>,
    pub total_content_viewed: usize,
}
