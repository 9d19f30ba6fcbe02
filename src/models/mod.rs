pub mod auth;
pub mod community;
pub mod interview;
pub mod learning;
pub mod mentor;
pub mod quiz;
pub mod user;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse<T> {
    pub message: T,
}
