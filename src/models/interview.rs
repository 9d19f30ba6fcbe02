use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::entities::interview::InterviewStatus;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ScheduleInterviewRequest {
    pub mentor_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    #[validate(length(min = 1, message = "topic must not be empty"))]
    pub topic: String,
    #[validate(length(min = 1, message = "difficulty must not be empty"))]
    pub difficulty: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CompleteInterviewRequest {
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
    #[validate(length(min = 1, message = "feedback must not be empty"))]
    pub feedback: String,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
}

/// Optional `?status=` filter shared by the interview listing endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusFilter {
    pub status: Option<InterviewStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleInterviewResponse {
    pub interview_id: Uuid,
    pub mentor_name: String,
    pub scheduled_time: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteInterviewResponse {
    pub message: String,
    pub score: f64,
    pub badges_earned: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InterviewStats {
    pub total_interviews: u64,
    pub average_score: f64,
    pub highest_score: f64,
    pub topics_covered: Vec<String>,
}
