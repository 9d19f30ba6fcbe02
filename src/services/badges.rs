//! Badge award rules.
//!
//! Each evaluator returns only the badges the user does not hold yet, so
//! appending the result never creates duplicates and awards stay idempotent.

use crate::entities::user::StringList;

pub const PERFECT_SCORE: &str = "Perfect Score";
pub const QUIZ_MASTER: &str = "Quiz Master";
pub const RISING_STAR: &str = "Rising Star";
pub const INTERVIEW_ACE: &str = "Interview Ace";
pub const STRONG_COMMUNICATOR: &str = "Strong Communicator";
pub const INTERVIEW_EXPERT: &str = "Interview Expert";
pub const MENTOR_CONNECTED: &str = "Mentor Connected";
pub const MENTORSHIP_MASTER: &str = "Mentorship Master";

/// Badges whose holders unlock the career exploration feature.
pub const APEX_BADGES: [&str; 4] = [
    INTERVIEW_ACE,
    MENTORSHIP_MASTER,
    "Career Explorer",
    "Industry Expert",
];

const QUIZ_MASTER_ATTEMPTS: u64 = 10;
const RISING_STAR_POINTS: i32 = 100;
const INTERVIEW_ACE_SCORE: f64 = 90.0;
const STRONG_COMMUNICATOR_SCORE: f64 = 80.0;
const INTERVIEW_EXPERT_COUNT: u64 = 5;
const MENTOR_CONNECTED_RATING: i32 = 4;
const MENTORSHIP_MASTER_SESSIONS: u64 = 3;

fn award(existing: &StringList, earned: &mut Vec<String>, badge: &str) {
    if !existing.contains(badge) {
        earned.push(badge.to_string());
    }
}

/// Badges earned by a quiz attempt. `attempt_count` and `total_points`
/// include the attempt being evaluated.
pub fn quiz_badges(
    existing: &StringList,
    perfect: bool,
    attempt_count: u64,
    total_points: i32,
) -> Vec<String> {
    let mut earned = Vec::new();

    if perfect {
        award(existing, &mut earned, PERFECT_SCORE);
    }
    if attempt_count >= QUIZ_MASTER_ATTEMPTS {
        award(existing, &mut earned, QUIZ_MASTER);
    }
    if total_points >= RISING_STAR_POINTS {
        award(existing, &mut earned, RISING_STAR);
    }

    earned
}

/// Badges earned when a mentor completes a mock interview for a student.
pub fn interview_badges(existing: &StringList, score: f64, completed_count: u64) -> Vec<String> {
    let mut earned = Vec::new();

    if score >= INTERVIEW_ACE_SCORE {
        award(existing, &mut earned, INTERVIEW_ACE);
    }
    if score >= STRONG_COMMUNICATOR_SCORE {
        award(existing, &mut earned, STRONG_COMMUNICATOR);
    }
    if completed_count >= INTERVIEW_EXPERT_COUNT {
        award(existing, &mut earned, INTERVIEW_EXPERT);
    }

    earned
}

/// Badges earned when a student completes a mentor connect session.
/// `successful_sessions` counts completed sessions rated 3 or higher.
pub fn session_badges(
    existing: &StringList,
    rating: Option<i32>,
    successful_sessions: u64,
) -> Vec<String> {
    let mut earned = Vec::new();

    if rating.is_some_and(|r| r >= MENTOR_CONNECTED_RATING) {
        award(existing, &mut earned, MENTOR_CONNECTED);
    }
    if successful_sessions >= MENTORSHIP_MASTER_SESSIONS {
        award(existing, &mut earned, MENTORSHIP_MASTER);
    }

    earned
}

/// Number of apex badges in the given badge set.
pub fn apex_badge_count(badges: &StringList) -> usize {
    APEX_BADGES.iter().filter(|b| badges.contains(b)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badges(values: &[&str]) -> StringList {
        StringList(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn perfect_attempt_awards_perfect_score_once() {
        let earned = quiz_badges(&badges(&[]), true, 1, 10);
        assert_eq!(earned, vec![PERFECT_SCORE]);

        // A repeat perfect attempt finds the badge already present.
        let earned = quiz_badges(&badges(&[PERFECT_SCORE]), true, 2, 20);
        assert!(earned.is_empty());
    }

    #[test]
    fn attempt_count_threshold_awards_quiz_master() {
        assert!(quiz_badges(&badges(&[]), false, 9, 0).is_empty());
        assert_eq!(quiz_badges(&badges(&[]), false, 10, 0), vec![QUIZ_MASTER]);
    }

    #[test]
    fn point_threshold_awards_rising_star() {
        assert!(quiz_badges(&badges(&[]), false, 1, 99).is_empty());
        assert_eq!(quiz_badges(&badges(&[]), false, 1, 100), vec![RISING_STAR]);
    }

    #[test]
    fn high_interview_score_awards_both_score_badges() {
        let earned = interview_badges(&badges(&[]), 92.0, 1);
        assert_eq!(earned, vec![INTERVIEW_ACE, STRONG_COMMUNICATOR]);
    }

    #[test]
    fn mid_interview_score_awards_communicator_only() {
        let earned = interview_badges(&badges(&[]), 85.0, 1);
        assert_eq!(earned, vec![STRONG_COMMUNICATOR]);
    }

    #[test]
    fn fifth_completed_interview_awards_expert() {
        assert!(interview_badges(&badges(&[]), 50.0, 4).is_empty());
        assert_eq!(
            interview_badges(&badges(&[]), 50.0, 5),
            vec![INTERVIEW_EXPERT]
        );
    }

    #[test]
    fn session_rating_awards_mentor_connected() {
        assert_eq!(
            session_badges(&badges(&[]), Some(4), 1),
            vec![MENTOR_CONNECTED]
        );
        assert!(session_badges(&badges(&[]), Some(3), 1).is_empty());
        assert!(session_badges(&badges(&[]), None, 1).is_empty());
    }

    #[test]
    fn third_successful_session_awards_mentorship_master() {
        let earned = session_badges(&badges(&[MENTOR_CONNECTED]), Some(5), 3);
        assert_eq!(earned, vec![MENTORSHIP_MASTER]);
    }

    #[test]
    fn existing_badges_are_never_re_earned() {
        let held = badges(&[PERFECT_SCORE, QUIZ_MASTER, RISING_STAR]);
        assert!(quiz_badges(&held, true, 50, 1000).is_empty());
    }

    #[test]
    fn apex_count_only_counts_apex_badges() {
        let held = badges(&[INTERVIEW_ACE, PERFECT_SCORE, "Career Explorer"]);
        assert_eq!(apex_badge_count(&held), 2);
    }
}
