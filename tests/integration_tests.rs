// Integration tests for Buddy Match: HTTP routes over the in-memory store

use actix_web::{http::StatusCode, test, web, App};
use buddy_match::core::{ConnectionManager, Matcher};
use buddy_match::models::{
    ConnectResponse, ConnectionsResponse, FindMatchesResponse, UserProfile, UserResponse,
};
use buddy_match::routes::{configure_routes, AppState};
use buddy_match::services::{CacheKey, CacheManager, InMemoryStore, ProfileStore, StoreResult};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn create_test_profile(id: &str, college: &str, year: &str, skills: &[&str]) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@example.edu", id),
        year: year.to_string(),
        college: college.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        availability: "weekday evenings".to_string(),
        linkedin_url: None,
        is_onboarded: true,
        created_at: None,
        updated_at: None,
    }
}

fn create_state(profiles: Vec<UserProfile>) -> AppState {
    let store = Arc::new(InMemoryStore::with_profiles(profiles));
    AppState {
        profiles: store.clone(),
        connections: ConnectionManager::new(store.clone(), store),
        cache: Arc::new(CacheManager::local_only(100, 60)),
        matcher: Matcher::with_default_weights(),
    }
}

fn campus() -> Vec<UserProfile> {
    let mut newcomer = create_test_profile("newcomer", "", "", &[]);
    newcomer.is_onboarded = false;

    vec![
        create_test_profile("alice", "MIT", "3", &["Rust", "Python"]),
        create_test_profile("bob", "MIT", "3", &["python"]),
        create_test_profile("carol", "MIT", "2", &["rust"]),
        create_test_profile("dave", "Yale", "1", &["painting"]),
        newcomer,
    ]
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_find_matches_ranks_and_filters() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "alice" }))
        .to_request();
    let body: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = body.matches.iter().map(|m| m.profile.id.as_str()).collect();
    // bob: 30 + 25 + 17.5 + 10, carol: 30 + 17.5 + 10, dave: 10 only
    assert_eq!(ids, vec!["bob", "carol"]);
    assert_eq!(body.matches[0].match_score, 83);
    assert_eq!(body.matches[1].match_score, 58);
    assert_eq!(body.total_results, 2);
}

#[actix_web::test]
async fn test_find_matches_unknown_user() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_find_matches_requires_user_id() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_connect_twice_conflicts() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/connections")
        .set_json(json!({ "userId": "alice", "connectToId": "bob" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/connections")
        .set_json(json!({ "userId": "bob", "connectToId": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_connect_self_rejected() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/connections")
        .set_json(json!({ "userId": "alice", "connectToId": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_newest_first_and_disconnect() {
    let app = app!(create_state(campus()));

    let mut created = Vec::new();
    for other in ["bob", "carol"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/connections")
            .set_json(json!({ "userId": "alice", "connectToId": other }))
            .to_request();
        let body: ConnectResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.connection.receiver.id, other);
        created.push(body.connection.id);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/connections?userId=alice")
        .to_request();
    let body: ConnectionsResponse = test::call_and_read_body_json(&app, req).await;
    let others: Vec<&str> = body.connections.iter().map(|c| c.user.id.as_str()).collect();
    assert_eq!(others, vec!["carol", "bob"]);

    // Receiver may remove it too
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/connections?connectionId={}&userId=bob", created[0]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for user in ["alice", "bob"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/connections?userId={}", user))
            .to_request();
        let body: ConnectionsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.connections.iter().all(|c| c.id != created[0]));
    }
}

#[actix_web::test]
async fn test_disconnect_by_outsider_is_not_found() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::post()
        .uri("/api/v1/connections")
        .set_json(json!({ "userId": "alice", "connectToId": "bob" }))
        .to_request();
    let body: ConnectResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/connections?connectionId={}&userId=carol",
            body.connection.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_onboarding_makes_user_matchable() {
    let app = app!(create_state(campus()));

    // Prime alice's cached matches before the newcomer onboards
    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "alice" }))
        .to_request();
    let before: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(before.matches.iter().all(|m| m.profile.id != "newcomer"));

    let req = test::TestRequest::post()
        .uri("/api/v1/onboarding")
        .set_json(json!({
            "userId": "newcomer",
            "year": "3",
            "college": "MIT",
            "skills": ["rust ", ""],
            "availability": "evenings",
            "linkedinURL": ""
        }))
        .to_request();
    let body: UserResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.user.is_onboarded);
    assert_eq!(body.user.skills, vec!["rust"]);
    assert_eq!(body.user.linkedin_url, None);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "alice" }))
        .to_request();
    let after: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(after.matches.iter().any(|m| m.profile.id == "newcomer"));
}

/// Profile store that onboards "newcomer" while the first candidate scan is
/// in flight, the way a concurrent onboarding request would
struct OnboardDuringScan {
    inner: Arc<InMemoryStore>,
    cache: Arc<CacheManager>,
    fired: AtomicBool,
}

#[async_trait::async_trait]
impl ProfileStore for OnboardDuringScan {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        self.inner.get_by_id(id).await
    }

    async fn scan_eligible(&self, exclude_id: &str) -> StoreResult<Vec<UserProfile>> {
        let pool = self.inner.scan_eligible(exclude_id).await?;

        if !self.fired.swap(true, Ordering::SeqCst) {
            let mut newcomer = self.inner.get_by_id("newcomer").await?.unwrap();
            newcomer.year = "3".to_string();
            newcomer.college = "MIT".to_string();
            newcomer.skills = vec!["rust".to_string()];
            newcomer.is_onboarded = true;
            self.inner.update(&newcomer).await?;
            self.cache.invalidate_pattern(CacheKey::all_matches()).await.unwrap();
        }

        Ok(pool)
    }

    async fn update(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.inner.update(profile).await
    }
}

#[actix_web::test]
async fn test_matches_computed_across_profile_write_are_not_cached() {
    let store = Arc::new(InMemoryStore::with_profiles(campus()));
    let cache = Arc::new(CacheManager::local_only(100, 60));
    let profiles = Arc::new(OnboardDuringScan {
        inner: store.clone(),
        cache: cache.clone(),
        fired: AtomicBool::new(false),
    });
    let app = app!(AppState {
        profiles: profiles.clone(),
        connections: ConnectionManager::new(profiles, store),
        cache,
        matcher: Matcher::with_default_weights(),
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "alice" }))
        .to_request();
    let first: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
    // Scanned before the onboarding landed
    assert!(first.matches.iter().all(|m| m.profile.id != "newcomer"));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({ "userId": "alice" }))
        .to_request();
    let second: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(second.matches.iter().any(|m| m.profile.id == "newcomer"));
}

#[actix_web::test]
async fn test_get_and_update_user() {
    let app = app!(create_state(campus()));

    let req = test::TestRequest::put()
        .uri("/api/v1/users/dave")
        .set_json(json!({ "college": "MIT", "year": "" }))
        .to_request();
    let body: UserResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.user.college, "MIT");
    assert_eq!(body.user.year, "1");
    assert!(body.user.updated_at.is_some());

    let req = test::TestRequest::get().uri("/api/v1/users/dave").to_request();
    let body: UserResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.user.college, "MIT");

    let req = test::TestRequest::get().uri("/api/v1/users/ghost").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(create_state(vec![]));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}
