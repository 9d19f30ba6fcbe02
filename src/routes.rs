use axum::{
    Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{community, interview, mentor_connection, quiz, quiz_attempt, user};
use crate::handlers::{
    auth, community as community_handlers, general, interview as interview_handlers, learning,
    mentor_connect, quiz as quiz_handlers, user as user_handlers,
};
use crate::middleware::auth_middleware;
use crate::models;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        general::health,
        auth::student_signup,
        auth::mentor_signup,
        auth::recruiter_signup,
        auth::login,
        auth::me,
        quiz_handlers::create_quiz,
        quiz_handlers::available_quizzes,
        quiz_handlers::quiz_detail,
        quiz_handlers::submit_attempt,
        quiz_handlers::my_attempts,
        community_handlers::create_community,
        community_handlers::recommend_communities,
        community_handlers::community_detail,
        community_handlers::join_community,
        community_handlers::leave_community,
        community_handlers::post_to_community,
        interview_handlers::schedule_interview,
        interview_handlers::my_interviews,
        interview_handlers::mentor_interviews,
        interview_handlers::complete_interview,
        interview_handlers::interview_detail,
        interview_handlers::cancel_interview,
        interview_handlers::interview_stats,
        mentor_connect::connect,
        mentor_connect::start_session,
        mentor_connect::complete_session,
        mentor_connect::my_sessions,
        mentor_connect::available_mentors,
        mentor_connect::mentorship_stats,
        mentor_connect::career_exploration,
        learning::list_resources,
        learning::view_resource,
        learning::learning_streak,
        learning::learning_trends,
        user_handlers::update_profile,
        user_handlers::progress,
        user_handlers::dashboard,
        user_handlers::request_mentor_connection,
        user_handlers::connection_requests,
        user_handlers::respond_to_connection,
    ),
    components(schemas(
        user::Role,
        quiz::Difficulty,
        quiz::Question,
        quiz_attempt::SubmittedAnswer,
        community::Post,
        interview::InterviewStatus,
        interview::Model,
        mentor_connection::ConnectionStatus,
        models::MessageResponse<String>,
        models::auth::StudentSignupRequest,
        models::auth::MentorSignupRequest,
        models::auth::RecruiterSignupRequest,
        models::auth::LoginRequest,
        models::auth::SignupResponse,
        models::auth::LoginResponse,
        models::auth::MeResponse,
        models::quiz::CreateQuizRequest,
        models::quiz::SubmitAttemptRequest,
        models::quiz::QuestionView,
        models::quiz::QuizSummary,
        models::quiz::QuizDetail,
        models::quiz::AttemptResponse,
        models::quiz::AttemptSummary,
        models::community::CreateCommunityRequest,
        models::community::CreatePostRequest,
        models::community::CommunitySummary,
        models::community::CommunityDetail,
        models::community::CreateCommunityResponse,
        models::community::RecommendResponse,
        models::interview::ScheduleInterviewRequest,
        models::interview::CompleteInterviewRequest,
        models::interview::ScheduleInterviewResponse,
        models::interview::CompleteInterviewResponse,
        models::interview::InterviewStats,
        models::mentor::ConnectRequest,
        models::mentor::CompleteSessionRequest,
        models::mentor::ConnectResponse,
        models::mentor::CompleteSessionResponse,
        models::mentor::SessionView,
        models::mentor::MentorMatch,
        models::mentor::AvailableMentorsResponse,
        models::mentor::MentorshipStats,
        models::mentor::CareerRecommendation,
        models::mentor::CareerExplorationResponse,
        models::learning::ResourceView,
        models::learning::ResourcesResponse,
        models::learning::StreakResponse,
        models::learning::TopicTrend,
        models::learning::TrendsResponse,
        models::user::UpdateProfileRequest,
        models::user::ConnectionRequestPayload,
        models::user::ConnectionRequestResponse,
        models::user::ConnectionRequestView,
        models::user::QuizStats,
        models::user::InterviewProgress,
        models::user::ProgressResponse,
        models::user::UpcomingInterview,
        models::user::CommunityMembership,
        models::user::StudentDashboard,
        models::user::MenteeSummary,
        models::user::MentorDashboard,
        models::user::TalentProfile,
        models::user::RecruiterDashboard,
        models::user::DashboardResponse,
    )),
    tags(
        (name = "general", description = "General endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "quiz", description = "Quizzes, attempts and scoring"),
        (name = "community", description = "Communities and recommendations"),
        (name = "interview", description = "Mock interview scheduling"),
        (name = "mentor-interviews", description = "Direct mentor connect sessions"),
        (name = "learning", description = "Learning resources"),
        (name = "user", description = "Profiles, progress and dashboards"),
    ),
)]
struct ApiDoc;

// Function to create the main application router
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        // Quiz routes
        .route("/quiz/create", post(quiz_handlers::create_quiz))
        .route("/quiz/available", get(quiz_handlers::available_quizzes))
        .route("/quiz/attempts/my", get(quiz_handlers::my_attempts))
        .route("/quiz/{quiz_id}", get(quiz_handlers::quiz_detail))
        .route("/quiz/{quiz_id}/attempt", post(quiz_handlers::submit_attempt))
        // Community routes
        .route("/community/create", post(community_handlers::create_community))
        .route(
            "/community/recommend",
            get(community_handlers::recommend_communities),
        )
        .route(
            "/community/{community_id}",
            get(community_handlers::community_detail),
        )
        .route(
            "/community/{community_id}/join",
            post(community_handlers::join_community),
        )
        .route(
            "/community/{community_id}/leave",
            post(community_handlers::leave_community),
        )
        .route(
            "/community/{community_id}/post",
            post(community_handlers::post_to_community),
        )
        // Interview routes
        .route(
            "/interview/schedule",
            post(interview_handlers::schedule_interview),
        )
        .route(
            "/interview/my-interviews",
            get(interview_handlers::my_interviews),
        )
        .route(
            "/interview/mentor/interviews",
            get(interview_handlers::mentor_interviews),
        )
        .route(
            "/interview/stats/performance",
            get(interview_handlers::interview_stats),
        )
        .route(
            "/interview/{interview_id}",
            get(interview_handlers::interview_detail)
                .delete(interview_handlers::cancel_interview),
        )
        .route(
            "/interview/{interview_id}/complete",
            put(interview_handlers::complete_interview),
        )
        // Direct mentor connect routes
        .route("/mentor-interviews/connect", post(mentor_connect::connect))
        .route(
            "/mentor-interviews/session/{session_id}/start",
            put(mentor_connect::start_session),
        )
        .route(
            "/mentor-interviews/session/{session_id}/complete",
            put(mentor_connect::complete_session),
        )
        .route(
            "/mentor-interviews/my-sessions",
            get(mentor_connect::my_sessions),
        )
        .route(
            "/mentor-interviews/available-mentors",
            get(mentor_connect::available_mentors),
        )
        .route(
            "/mentor-interviews/stats/mentorship",
            get(mentor_connect::mentorship_stats),
        )
        .route(
            "/mentor-interviews/recommend/career-exploration",
            get(mentor_connect::career_exploration),
        )
        // Learning routes
        .route("/learning/resources", get(learning::list_resources))
        .route(
            "/learning/resources/{resource_id}/view",
            post(learning::view_resource),
        )
        .route(
            "/learning/progress/streak",
            get(learning::learning_streak),
        )
        .route("/learning/trends", get(learning::learning_trends))
        // User routes
        .route("/user/profile", put(user_handlers::update_profile))
        .route("/user/progress", get(user_handlers::progress))
        .route("/user/dashboard", get(user_handlers::dashboard))
        .route(
            "/user/connect/mentor",
            post(user_handlers::request_mentor_connection),
        )
        .route(
            "/user/mentor/connection-requests",
            get(user_handlers::connection_requests),
        )
        .route(
            "/user/mentor/connection-request/{request_id}/{action}",
            put(user_handlers::respond_to_connection),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(general::health))
        // Auth routes
        .route("/auth/student/signup", post(auth::student_signup))
        .route("/auth/mentor/signup", post(auth::mentor_signup))
        .route("/auth/recruiter/signup", post(auth::recruiter_signup))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .fallback(handler_404)
        .with_state(state)
        // Swagger UI at root
        .merge(SwaggerUi::new("/").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

// Handler for 404 Not Found errors
async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
