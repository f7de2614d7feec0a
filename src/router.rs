use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::SessionTokens;
use crate::db::IntakeStorage;
use crate::handlers::applications::{apply_handler, list_applications_handler};
use crate::handlers::auth::login_handler;
use crate::notify::Notifier;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct IntakeState {
    pub storage: IntakeStorage,
    pub sessions: Arc<SessionTokens>,
    pub notifier: Arc<dyn Notifier>,
}

impl IntakeState {
    pub fn new(storage: IntakeStorage, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            storage,
            sessions: Arc::new(SessionTokens::new()),
            notifier,
        }
    }
}

pub fn intake_router(state: IntakeState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/apply", post(apply_handler))
        .route("/api/applications", get(list_applications_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
