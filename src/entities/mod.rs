pub mod community;
pub mod interview;
pub mod learning_progress;
pub mod learning_resource;
pub mod mentor_connection;
pub mod mentor_session;
pub mod quiz;
pub mod quiz_attempt;
pub mod user;
