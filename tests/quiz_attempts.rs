mod common;

use common::*;
use serde_json::json;
use skillbridge_backend::entities::quiz::Difficulty;
use skillbridge_backend::models::auth::MeResponse;
use skillbridge_backend::models::quiz::{AttemptResponse, AttemptSummary, QuizDetail, QuizSummary};

#[tokio::test]
async fn only_mentors_can_create_quizzes() {
    let ctx = TestContext::new().await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let app = ctx.app();

    let (status, err): (u16, ErrorResponse) = post_json_auth(
        &app,
        "/quiz/create",
        &auth_token(&student),
        json!({
            "title": "Nope",
            "difficulty": "easy",
            "questions": [{"question": "q", "options": ["a", "b"], "correct_answer": "a"}]
        }),
    )
    .await;
    assert_eq!(status, 403);
    assert!(err.message.contains("Only mentors"));
}

#[tokio::test]
async fn quiz_creation_derives_points_and_time_limit() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let app = ctx.app();

    let (status, quiz): (u16, QuizSummary) = post_json_auth(
        &app,
        "/quiz/create",
        &auth_token(&mentor),
        json!({
            "title": "Easy Basics",
            "difficulty": "easy",
            "questions": [
                {"question": "q1", "options": ["a", "b"], "correct_answer": "a"},
                {"question": "q2", "options": ["a", "b"], "correct_answer": "b"}
            ]
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(quiz.points, 10);
    assert_eq!(quiz.time_limit, 300);
    assert_eq!(quiz.questions_count, 2);
}

#[tokio::test]
async fn quiz_detail_strips_correct_answers() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Hidden Answers", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();

    let (status, detail): (u16, serde_json::Value) = get_auth(
        &app,
        &format!("/quiz/{}", quiz.id),
        &auth_token(&student),
    )
    .await;
    assert_eq!(status, 200);

    let questions = detail["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    for q in questions {
        assert!(q.get("correct_answer").is_none());
    }

    let typed: QuizDetail = serde_json::from_value(detail).unwrap();
    assert_eq!(typed.title, "Hidden Answers");
}

#[tokio::test]
async fn perfect_attempt_earns_full_points_and_badge() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Perfect Run", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();
    let token = auth_token(&student);

    let (status, attempt): (u16, AttemptResponse) = post_json_auth(
        &app,
        &format!("/quiz/{}/attempt", quiz.id),
        &token,
        json!({
            "answers": [
                {"question_index": 0, "answer": "b"},
                {"question_index": 1, "answer": "b"}
            ],
            "time_taken": 200
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(attempt.correct_answers, 2);
    assert_eq!(attempt.score_percentage, 100.0);
    assert_eq!(attempt.final_score, 100.0);
    assert_eq!(attempt.points_earned, 10);
    assert!(attempt.badges_earned.contains(&"Perfect Score".to_string()));
    assert_eq!(attempt.next_recommended_difficulty, Difficulty::Medium);

    let (_, me): (u16, MeResponse) = get_auth(&app, "/auth/me", &token).await;
    assert_eq!(me.points, 10);
    assert!(me.badges.contains(&"Perfect Score".to_string()));
}

#[tokio::test]
async fn tab_switches_and_misses_reduce_the_score() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Half Right", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();

    // One of two correct with two tab switches: 50 - 20 = 30.
    let (status, attempt): (u16, AttemptResponse) = post_json_auth(
        &app,
        &format!("/quiz/{}/attempt", quiz.id),
        &auth_token(&student),
        json!({
            "answers": [
                {"question_index": 0, "answer": "b"},
                {"question_index": 1, "answer": "a"}
            ],
            "time_taken": 100,
            "tab_switches": 2
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(attempt.correct_answers, 1);
    assert_eq!(attempt.score_percentage, 50.0);
    assert_eq!(attempt.tab_penalty, 20.0);
    assert_eq!(attempt.final_score, 30.0);
    assert_eq!(attempt.points_earned, 3);
    assert_eq!(attempt.next_recommended_difficulty, Difficulty::Easy);
}

#[tokio::test]
async fn overtime_attempt_is_penalized_per_full_minute() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Slow Run", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();

    // 130 seconds over a 300 second limit: two full minutes over, -10.
    let (status, attempt): (u16, AttemptResponse) = post_json_auth(
        &app,
        &format!("/quiz/{}/attempt", quiz.id),
        &auth_token(&student),
        json!({
            "answers": [
                {"question_index": 0, "answer": "b"},
                {"question_index": 1, "answer": "b"}
            ],
            "time_taken": 430
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(attempt.time_penalty, 10.0);
    assert_eq!(attempt.final_score, 90.0);
}

#[tokio::test]
async fn attempt_against_missing_quiz_is_404() {
    let ctx = TestContext::new().await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let app = ctx.app();

    let (status, err): (u16, ErrorResponse) = post_json_auth(
        &app,
        &format!("/quiz/{}/attempt", uuid::Uuid::new_v4()),
        &auth_token(&student),
        json!({"answers": [], "time_taken": 10}),
    )
    .await;
    assert_eq!(status, 404);
    assert!(err.message.contains("Quiz not found"));
}

#[tokio::test]
async fn my_attempts_lists_newest_first() {
    let ctx = TestContext::new().await;
    let mentor = create_mentor(&ctx.db, "m@example.com").await;
    let student = create_student(&ctx.db, "s@example.com").await;
    let quiz = create_two_question_quiz(&ctx.db, "Repeats", Difficulty::Easy, mentor.id).await;
    let app = ctx.app();
    let token = auth_token(&student);

    for answer in ["a", "b"] {
        let (status, _): (u16, AttemptResponse) = post_json_auth(
            &app,
            &format!("/quiz/{}/attempt", quiz.id),
            &token,
            json!({
                "answers": [
                    {"question_index": 0, "answer": answer},
                    {"question_index": 1, "answer": answer}
                ],
                "time_taken": 50
            }),
        )
        .await;
        assert_eq!(status, 200);
    }

    let (status, attempts): (u16, Vec<AttemptSummary>) =
        get_auth(&app, "/quiz/attempts/my", &token).await;
    assert_eq!(status, 200);
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].created_at >= attempts[1].created_at);
    let correct: Vec<i32> = attempts.iter().map(|a| a.correct_answers).collect();
    assert!(correct.contains(&0) && correct.contains(&2));
}
