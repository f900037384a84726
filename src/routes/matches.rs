use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::routes::{error_body, server_error, validation_failed, AppState};
use crate::services::CacheKey;

/// Configure match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.profiles.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let user_id = &req.user_id;
    let cache_key = CacheKey::matches(user_id);
    // Captured before any store read; a profile write after this point
    // keeps the computed list out of the cache
    let generation = state.cache.generation();

    if let Ok(cached) = state.cache.get::<FindMatchesResponse>(&cache_key).await {
        tracing::debug!("Serving cached matches for {}", user_id);
        return HttpResponse::Ok().json(cached);
    }

    let user = match state.profiles.get_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::NotFound().json(error_body(
                404,
                "User not found",
                format!("No user {}", user_id),
            ));
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return server_error();
        }
    };

    // Matching needs the onboarding fields of the requester too
    if !user.is_eligible() {
        tracing::info!("User {} has not completed onboarding, no matches", user_id);
        return HttpResponse::Ok().json(FindMatchesResponse {
            matches: vec![],
            total_results: 0,
        });
    }

    let candidates = match state.profiles.scan_eligible(user_id).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to scan candidates for {}: {}", user_id, e);
            return server_error();
        }
    };

    let result = state.matcher.find_matches(&user, candidates);

    let response = FindMatchesResponse {
        total_results: result.matches.len(),
        matches: result.matches,
    };

    if let Err(e) = state.cache.set_if_current(&cache_key, &response, generation).await {
        tracing::warn!("Failed to cache matches for {}: {}", user_id, e);
    }

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        response.matches.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}
