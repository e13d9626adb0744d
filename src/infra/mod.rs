pub mod discord;
pub mod github;
