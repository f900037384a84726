use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{clean_skills, OnboardingRequest, UpdateProfileRequest, UserProfile, UserResponse};
use crate::routes::{error_body, server_error, validation_failed, AppState};
use crate::services::{CacheKey, StoreError};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}", web::put().to(update_user))
        .route("/onboarding", web::post().to(onboard));
}

/// GET /api/v1/users/{id}
async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.profiles.get_by_id(&id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserResponse { user }),
        Ok(None) => user_not_found(&id),
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", id, e);
            server_error()
        }
    }
}

/// PUT /api/v1/users/{id}
///
/// Only non-empty fields are applied.
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let id = path.into_inner();

    let mut user = match state.profiles.get_by_id(&id).await {
        Ok(Some(user)) => user,
        Ok(None) => return user_not_found(&id),
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", id, e);
            return server_error();
        }
    };

    apply_update(&mut user, req.into_inner());
    save_profile(&state, user).await
}

/// POST /api/v1/onboarding
async fn onboard(
    state: web::Data<AppState>,
    req: web::Json<OnboardingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();

    let mut user = match state.profiles.get_by_id(&req.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return user_not_found(&req.user_id),
        Err(e) => {
            tracing::error!("Onboarding lookup failed for {}: {}", req.user_id, e);
            return server_error();
        }
    };

    user.year = req.year.trim().to_string();
    user.college = req.college.trim().to_string();
    user.skills = clean_skills(&req.skills);
    user.availability = req.availability.trim().to_string();
    user.linkedin_url = req.linkedin_url.filter(|url| !url.trim().is_empty());
    user.is_onboarded = true;

    tracing::info!("Onboarding user {}", user.id);
    save_profile(&state, user).await
}

fn apply_update(user: &mut UserProfile, update: UpdateProfileRequest) {
    // Blank values count as absent, same rule as `UserProfile::is_eligible`
    let non_empty = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(year) = non_empty(update.year) {
        user.year = year;
    }
    if let Some(college) = non_empty(update.college) {
        user.college = college;
    }
    if let Some(skills) = update.skills {
        user.skills = clean_skills(&skills);
    }
    if let Some(availability) = non_empty(update.availability) {
        user.availability = availability;
    }
    if let Some(url) = non_empty(update.linkedin_url) {
        user.linkedin_url = Some(url);
    }
    if let Some(is_onboarded) = update.is_onboarded {
        user.is_onboarded = is_onboarded;
    }
}

/// Persist a profile and drop every cached ranking it may affect
async fn save_profile(state: &AppState, mut user: UserProfile) -> HttpResponse {
    user.updated_at = Some(chrono::Utc::now());

    match state.profiles.update(&user).await {
        Ok(user) => {
            if let Err(e) = state.cache.invalidate_pattern(CacheKey::all_matches()).await {
                tracing::warn!("Failed to invalidate match cache: {}", e);
            }
            HttpResponse::Ok().json(UserResponse { user })
        }
        Err(StoreError::NotFound(_)) => user_not_found(&user.id),
        Err(e) => {
            tracing::error!("Failed to update user {}: {}", user.id, e);
            server_error()
        }
    }
}

fn user_not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(error_body(404, "User not found", format!("No user {}", id)))
}
