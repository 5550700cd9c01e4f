pub mod admin;
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod media;
pub mod reports;
