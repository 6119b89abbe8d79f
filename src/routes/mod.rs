use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use contact_relay_notification::Mailer;

use crate::config::Config;

pub mod contact;
pub mod health;

/// Largest form body that is read. A 4000 character enquiry needs at most
/// 48 KiB urlencoded; anything past this limit is answered as too long.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/contact",
            post(contact::action).fallback(contact::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
