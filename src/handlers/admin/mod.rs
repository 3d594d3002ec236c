pub mod moderation;
pub mod stats;
pub mod users;
