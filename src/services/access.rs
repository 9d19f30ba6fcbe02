//! Badge- and role-gated access checks, shared by every handler that guards
//! a feature. Each check is a pure predicate over the current user record.

use crate::entities::user::{Model as User, Role};
use crate::errors::AppError;
use crate::services::badges::{APEX_BADGES, apex_badge_count};

/// Minimum badges to schedule a mock interview.
pub const INTERVIEW_BADGE_THRESHOLD: usize = 3;
/// Minimum badges for direct mentor connect.
pub const CONNECT_BADGE_THRESHOLD: usize = 5;

/// Apex badges needed for career exploration: half the apex list.
pub fn apex_badge_threshold() -> usize {
    APEX_BADGES.len() / 2
}

pub fn require_role(user: &User, role: Role, action: &str) -> Result<(), AppError> {
    if user.role == role {
        return Ok(());
    }
    let role_name = match role {
        Role::Student => "students",
        Role::Mentor => "mentors",
        Role::Recruiter => "recruiters",
    };
    Err(AppError::Forbidden(format!("Only {role_name} can {action}")))
}

pub fn require_badge_count(user: &User, required: usize, feature: &str) -> Result<(), AppError> {
    let current = user.badge_count();
    if current >= required {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You need at least {required} badges {feature}. Current: {current}"
        )))
    }
}

/// Returns the earned apex badge count on success.
pub fn require_apex_badges(user: &User) -> Result<usize, AppError> {
    let required = apex_badge_threshold();
    let earned = apex_badge_count(&user.badges);
    if earned >= required {
        Ok(earned)
    } else {
        Err(AppError::Forbidden(format!(
            "This feature requires earning {required} apex badges. Current: {earned}"
        )))
    }
}
