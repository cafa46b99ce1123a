pub mod auth;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod users;
