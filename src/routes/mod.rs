// Route exports
pub mod connections;
pub mod matches;
pub mod users;

use actix_web::{web, HttpResponse};
use crate::core::{ConnectionManager, CoreError, Matcher};
use crate::models::ErrorResponse;
use crate::services::{CacheManager, ProfileStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub connections: ConnectionManager,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(connections::configure)
            .configure(users::configure),
    );
}

pub(crate) fn error_body(status_code: u16, error: &str, message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    }
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()))
}

/// Generic 500; the cause stays in the logs
pub(crate) fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(error_body(
        500,
        "Server error",
        "An internal error occurred",
    ))
}

/// Map a core failure onto its HTTP response
pub(crate) fn core_error_response(err: CoreError) -> HttpResponse {
    match err {
        CoreError::ProfileNotFound(id) => {
            HttpResponse::NotFound().json(error_body(404, "User not found", format!("No user {}", id)))
        }
        CoreError::SelfConnection => {
            HttpResponse::BadRequest().json(error_body(400, "Cannot connect to yourself", "userId and connectToId must differ"))
        }
        CoreError::AlreadyConnected => {
            HttpResponse::Conflict().json(error_body(409, "Connection already exists", "These users are already connected"))
        }
        CoreError::NotFoundOrUnauthorized => HttpResponse::NotFound().json(error_body(
            404,
            "Connection not found or unauthorized",
            "No such connection for this user",
        )),
        CoreError::StoreUnavailable(e) => {
            tracing::error!("Store failure: {}", e);
            server_error()
        }
    }
}
