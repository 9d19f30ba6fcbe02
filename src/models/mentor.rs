use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::entities::mentor_session::SessionStatus;
use crate::entities::user::Role;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ConnectRequest {
    /// video, audio or chat.
    #[serde(default = "default_call_type")]
    pub call_type: String,
}

fn default_call_type() -> String {
    String::from("video")
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CompleteSessionRequest {
    pub rating: Option<i32>,
    pub feedback: Option<String>,
    /// Semicolon-delimited list.
    pub key_takeaways: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SessionStatusFilter {
    pub status: Option<SessionStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectResponse {
    pub session_id: Uuid,
    pub mentor_name: String,
    pub matched_expertise: Vec<String>,
    pub call_type: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteSessionResponse {
    pub message: String,
    pub badges_earned: Vec<String>,
}

/// A session as listed for one participant, annotated with their role in it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub mentor_id: Uuid,
    pub mentor_name: String,
    pub call_type: String,
    pub status: SessionStatus,
    pub matched_expertise: Vec<String>,
    pub session_rating: Option<i32>,
    pub my_role: Role,
}

impl SessionView {
    pub fn for_participant(m: crate::entities::mentor_session::Model, viewer_id: Uuid) -> Self {
        let my_role = if m.student_id == viewer_id {
            Role::Student
        } else {
            Role::Mentor
        };
        Self {
            id: m.id,
            student_id: m.student_id,
            student_name: m.student_name,
            mentor_id: m.mentor_id,
            mentor_name: m.mentor_name,
            call_type: m.call_type,
            status: m.status,
            matched_expertise: m.matched_expertise.0,
            session_rating: m.session_rating,
            my_role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MentorMatch {
    pub id: Uuid,
    pub name: String,
    pub expertise: Vec<String>,
    pub experience_years: i32,
    pub match_score: usize,
    pub skills_overlap: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailableMentorsResponse {
    pub available_mentors: Vec<MentorMatch>,
    pub your_badges_count: usize,
    pub required_badges: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MentorshipStats {
    pub total_sessions: u64,
    pub average_rating: f64,
    pub mentors_connected: usize,
    pub badges_from_mentorship: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CareerRecommendation {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub growth_potential: String,
    pub match_score: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CareerExplorationResponse {
    pub unconventional_careers: Vec<CareerRecommendation>,
    pub earned_apex_badges: usize,
    pub required_apex_badges: usize,
    pub message: String,
}
