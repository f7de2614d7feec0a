pub mod applications;
pub mod auth;
