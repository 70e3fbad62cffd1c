//! Inkwell HTTP API
//!
//! ```text
//! GET  /health         liveness
//! POST /auth/register  open while no identity exists, admin-only afterwards
//! POST /auth/login     email + password → bearer token
//! GET  /users/me       current identity
//! POST /notes          create a note (authenticated)
//! GET  /notes          list notes (authenticated)
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod settings;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use inkwell_core::{AuthConfig, AuthService, Store};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use settings::Settings;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Store, config: &AuthConfig) -> Self {
        Self {
            store,
            auth: Arc::new(AuthService::new(config)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/users/me", get(handlers::me))
        .route("/notes", post(handlers::create_note).get(handlers::list_notes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
