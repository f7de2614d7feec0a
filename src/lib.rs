pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod router;

pub use error::IntakeError;
