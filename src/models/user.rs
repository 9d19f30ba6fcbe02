use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::mentor_connection::{self, ConnectionStatus};
use crate::models::quiz::AttemptSummary;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    /// Comma-delimited lists; omitted fields are left unchanged.
    pub domains: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub career_goal: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizStats {
    pub total_quiz_attempts: u64,
    pub average_score: f64,
    pub best_score: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InterviewProgress {
    pub total_completed: u64,
    pub upcoming: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub quiz_stats: QuizStats,
    pub interview_stats: InterviewProgress,
    pub communities_joined: u64,
    pub content_viewed: u64,
    pub badges_earned: usize,
    pub current_rank: u64,
}

// ============================================================================
// Mentor connection requests
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ConnectionRequestPayload {
    pub mentor_id: Uuid,
    #[validate(length(min = 1, max = 500))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionRequestResponse {
    pub connection_id: Uuid,
    pub message: String,
}

/// A pending or answered request, as shown to the receiving mentor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionRequestView {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub status: ConnectionStatus,
    pub message: String,
    pub student_skills: Vec<String>,
    pub student_badges: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<mentor_connection::Model> for ConnectionRequestView {
    fn from(m: mentor_connection::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            student_name: m.student_name,
            status: m.status,
            message: m.message,
            student_skills: m.student_skills.0,
            student_badges: m.student_badges.0,
            created_at: m.created_at,
            responded_at: m.responded_at,
        }
    }
}

// ============================================================================
// Dashboard DTOs (role-dispatched)
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpcomingInterview {
    pub id: Uuid,
    pub mentor_name: String,
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityMembership {
    pub id: Uuid,
    pub name: String,
    pub topic: String,
    pub members_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDashboard {
    pub name: String,
    pub points: i32,
    pub badges: Vec<String>,
    pub domains: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub latest_quiz_attempts: Vec<AttemptSummary>,
    pub upcoming_interviews: Vec<UpcomingInterview>,
    pub community_memberships: Vec<CommunityMembership>,
    pub leaderboard_rank: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenteeSummary {
    pub id: Uuid,
    pub name: String,
    pub points: i32,
    pub badges: usize,
    pub quiz_attempts: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MentorDashboard {
    pub name: String,
    pub expertise: Vec<String>,
    pub experience_years: i32,
    pub availability: bool,
    pub total_interviews_conducted: u64,
    pub upcoming_sessions: u64,
    pub recent_mentees: Vec<MenteeSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TalentProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub points: i32,
    pub badges: Vec<String>,
    pub domains: Vec<String>,
    pub skills: Vec<String>,
    pub quiz_attempts: u64,
    pub completed_interviews: u64,
}

impl TalentProfile {
    /// Ranking weight used for the recruiter talent pool.
    pub fn activity_score(&self) -> i64 {
        i64::from(self.points)
            + self.badges.len() as i64 * 50
            + self.completed_interviews as i64 * 100
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecruiterDashboard {
    pub total_students_viewed: usize,
    pub top_talent: Vec<TalentProfile>,
    pub domains_represented: Vec<String>,
    pub skills_represented: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardResponse {
    Student(StudentDashboard),
    Mentor(MentorDashboard),
    Recruiter(RecruiterDashboard),
}
