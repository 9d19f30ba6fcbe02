pub mod content;
pub mod users;

pub use content::{ContentSeedConfig, seed_content};
pub use users::{UserSeedConfig, seed_users};
