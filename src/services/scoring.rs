//! Quiz attempt scoring.
//!
//! Pure arithmetic over the quiz definition and the submitted answers; the
//! handler persists the result and applies the gamification side effects.

use crate::entities::quiz::{Difficulty, Question};
use crate::entities::quiz_attempt::SubmittedAnswer;

/// Percentage points deducted per full minute over the time limit.
const TIME_PENALTY_PER_MINUTE: f64 = 5.0;
/// Percentage points deducted per recorded tab switch.
const TAB_SWITCH_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptScore {
    pub correct_answers: i32,
    pub total_questions: i32,
    /// Raw percentage before penalties.
    pub score_percentage: f64,
    pub time_penalty: f64,
    pub tab_penalty: f64,
    pub final_score: f64,
    pub points_earned: i32,
    pub next_recommended_difficulty: Difficulty,
}

impl AttemptScore {
    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0
            && self.correct_answers == self.total_questions
            && self.final_score >= 100.0
    }
}

/// Scores a submission against a quiz definition.
///
/// Answers referencing an out-of-range question index are ignored: they
/// neither count as correct nor fail the submission.
pub fn score_attempt(
    questions: &[Question],
    difficulty: Difficulty,
    quiz_points: i32,
    time_limit: i32,
    answers: &[SubmittedAnswer],
    time_taken: i64,
    tab_switches: u32,
) -> AttemptScore {
    let total_questions = questions.len() as i32;

    let correct_answers = answers
        .iter()
        .filter(|a| {
            questions
                .get(a.question_index)
                .is_some_and(|q| q.correct_answer == a.answer)
        })
        .count() as i32;

    let score_percentage = if total_questions > 0 {
        f64::from(correct_answers) / f64::from(total_questions) * 100.0
    } else {
        0.0
    };

    let overtime_minutes = (time_taken - i64::from(time_limit)).max(0) / 60;
    let time_penalty = overtime_minutes as f64 * TIME_PENALTY_PER_MINUTE;
    let tab_penalty = f64::from(tab_switches) * TAB_SWITCH_PENALTY;

    let final_score = (score_percentage - time_penalty - tab_penalty).max(0.0);
    let points_earned = (final_score / 100.0 * f64::from(quiz_points)).floor() as i32;

    AttemptScore {
        correct_answers,
        total_questions,
        score_percentage,
        time_penalty,
        tab_penalty,
        final_score,
        points_earned,
        next_recommended_difficulty: recommend_difficulty(difficulty, score_percentage),
    }
}

/// Steps the difficulty up on a strong raw score, down on a weak one,
/// clamped to the easy..hard range.
fn recommend_difficulty(current: Difficulty, score_percentage: f64) -> Difficulty {
    if score_percentage >= 80.0 {
        current.step_up()
    } else if score_percentage >= 50.0 {
        current
    } else {
        current.step_down()
    }
}
