pub mod auth;
pub mod community;
pub mod general;
pub mod interview;
pub mod learning;
pub mod mentor_connect;
pub mod quiz;
pub mod user;
