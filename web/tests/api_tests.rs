//! End-to-end API tests over the in-memory repositories.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum_test::TestServer;
use lumen_core::mocks::{
    MockBookingRepository, MockEditRequestRepository, MockPhotographerRepository,
    MockReportingStore, MockReviewRepository, MockSettingsRepository, MockTestimonialRepository,
    MockUserRepository,
};
use lumen_web::{AppState, UploadConfig, build_router};
use serde_json::{Value, json};
use std::sync::Arc;

fn test_server() -> TestServer {
    let users = Arc::new(MockUserRepository::new());
    let photographers = Arc::new(MockPhotographerRepository::new());
    let bookings = Arc::new(MockBookingRepository::new());
    let reviews = Arc::new(MockReviewRepository::new());
    let reporting = Arc::new(MockReportingStore::new(
        Arc::clone(&users),
        Arc::clone(&photographers),
        Arc::clone(&bookings),
        Arc::clone(&reviews),
    ));
    let uploads = UploadConfig::new(
        std::env::temp_dir().join(format!("lumen-api-test-{}", uuid::Uuid::new_v4())),
    );
    let state = AppState::new(
        users,
        photographers,
        bookings,
        reviews,
        Arc::new(MockTestimonialRepository::new()),
        Arc::new(MockEditRequestRepository::new()),
        Arc::new(MockSettingsRepository::new()),
        reporting,
        uploads,
    );
    TestServer::new(build_router(state)).expect("failed to start test server")
}

async fn register_client(server: &TestServer, username: &str) -> Value {
    let res = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
        }))
        .await;
    res.assert_status(axum::http::StatusCode::CREATED);
    res.json::<Value>()["user"].clone()
}

async fn register_photographer(server: &TestServer, username: &str) -> (Value, Value) {
    let res = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
            "role": "photographer",
            "specialization": "Portrait Photography",
            "services": ["Portrait Photography"],
            "experience": 5,
        }))
        .await;
    res.assert_status(axum::http::StatusCode::CREATED);
    let user = res.json::<Value>()["user"].clone();

    // The profile is created alongside the account.
    let profiles = server.get("/api/photographers").await.json::<Vec<Value>>();
    let profile = profiles
        .into_iter()
        .find(|p| p["userId"] == user["id"])
        .expect("profile should exist");
    (user, profile)
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = test_server();
    let res = server.get("/api/health").await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_register_creates_photographer_profile_with_defaults() {
    let server = test_server();
    let (_, profile) = register_photographer(&server, "bob").await;
    let pricing = profile["pricing"].as_array().unwrap();
    assert_eq!(pricing.len(), 1);
    assert_eq!(pricing[0]["service"], "Basic Package");
    assert_eq!(pricing[0]["price"], 100.0);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_login_checks_password() {
    let server = test_server();
    register_client(&server, "alice").await;

    let dup = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123",
        }))
        .await;
    dup.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert!(dup.json::<Value>()["message"].is_string());

    let ok = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;
    ok.assert_status_ok();

    let bad = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    bad.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_never_serialized() {
    let server = test_server();
    let user = register_client(&server, "alice").await;
    assert!(user.get("password").is_none());
    let fetched = server
        .get(&format!("/api/users/{}", user["id"].as_str().unwrap()))
        .await
        .json::<Value>();
    assert!(fetched.get("password").is_none());
}

#[tokio::test]
async fn test_unknown_ids_return_404_envelope() {
    let server = test_server();
    let missing = uuid::Uuid::new_v4();
    for path in [
        format!("/api/users/{missing}"),
        format!("/api/photographers/{missing}"),
        format!("/api/bookings/{missing}"),
        format!("/api/photo-edit-requests/{missing}"),
    ] {
        let res = server.get(&path).await;
        res.assert_status(axum::http::StatusCode::NOT_FOUND);
        assert!(res.json::<Value>()["message"].is_string());
    }
}

#[tokio::test]
async fn test_booking_price_derived_from_pricing_entry() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;

    let res = server
        .post("/api/bookings")
        .json(&json!({
            "clientId": client["id"],
            "photographerId": profile["id"],
            "service": "Basic Package",
            "date": "2026-09-12",
            "time": "10:00",
            "duration": 2,
            "location": "Studio A",
        }))
        .await;
    res.assert_status(axum::http::StatusCode::CREATED);
    let booking = &res.json::<Value>()["booking"];
    assert_eq!(booking["price"], 100.0);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["timeSlot"]["end"], "12:00");
}

#[tokio::test]
async fn test_confirm_books_slot_and_cancel_frees_it() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;
    let photographer_id = profile["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/api/photographers/{photographer_id}/availability"))
        .json(&json!({
            "date": "2026-09-12",
            "timeSlots": [{ "start": "10:00", "end": "12:00" }],
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let booking = server
        .post("/api/bookings")
        .json(&json!({
            "clientId": client["id"],
            "photographerId": photographer_id,
            "service": "Basic Package",
            "date": "2026-09-12",
            "time": "10:00",
            "duration": 2,
            "location": "Studio A",
        }))
        .await
        .json::<Value>()["booking"]
        .clone();
    let booking_id = booking["id"].as_str().unwrap().to_string();

    server
        .put(&format!("/api/bookings/{booking_id}/status"))
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();
    let profile = server
        .get(&format!("/api/photographers/{photographer_id}"))
        .await
        .json::<Value>();
    assert_eq!(profile["availability"][0]["timeSlots"][0]["isBooked"], true);

    server
        .put(&format!("/api/bookings/{booking_id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status_ok();
    let profile = server
        .get(&format!("/api/photographers/{photographer_id}"))
        .await
        .json::<Value>();
    assert_eq!(profile["availability"][0]["timeSlots"][0]["isBooked"], false);
}

#[tokio::test]
async fn test_reviews_update_photographer_rating() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;
    let photographer_id = profile["id"].as_str().unwrap().to_string();

    for rating in [5, 3] {
        server
            .post("/api/reviews")
            .json(&json!({
                "clientId": client["id"],
                "photographerId": photographer_id,
                "rating": rating,
                "comment": "Great shoot",
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let profile = server
        .get(&format!("/api/photographers/{photographer_id}"))
        .await
        .json::<Value>();
    assert_eq!(profile["rating"], 4.0);
    assert_eq!(profile["reviewCount"], 2);

    let listed = server
        .get(&format!("/api/reviews/photographer/{photographer_id}"))
        .await
        .json::<Value>();
    assert_eq!(listed["totalReviews"], 2);

    let stats = server
        .get(&format!("/api/reviews/photographer/{photographer_id}/stats"))
        .await
        .json::<Value>();
    assert_eq!(stats["stats"]["averageRating"], 4.0);
    assert_eq!(stats["stats"]["totalReviews"], 2);
}

#[tokio::test]
async fn test_out_of_range_rating_rejected() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;

    let res = server
        .post("/api/reviews")
        .json(&json!({
            "clientId": client["id"],
            "photographerId": profile["id"],
            "rating": 6,
            "comment": "Too good",
        }))
        .await;
    res.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_testimonial_promotion_is_unique_per_review() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;

    let review = server
        .post("/api/reviews")
        .json(&json!({
            "clientId": client["id"],
            "photographerId": profile["id"],
            "rating": 5,
            "comment": "Wonderful",
        }))
        .await
        .json::<Value>()["review"]
        .clone();

    let available = server
        .get("/api/testimonials/available-reviews")
        .await
        .json::<Vec<Value>>();
    assert_eq!(available.len(), 1);

    let promoted = server
        .post("/api/testimonials")
        .json(&json!({ "reviewId": review["id"] }))
        .await;
    promoted.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        promoted.json::<Value>()["testimonial"]["title"],
        "Great Experience"
    );

    let again = server
        .post("/api/testimonials")
        .json(&json!({ "reviewId": review["id"] }))
        .await;
    again.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let available = server
        .get("/api/testimonials/available-reviews")
        .await
        .json::<Vec<Value>>();
    assert!(available.is_empty());
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;
    let client_id = client["id"].as_str().unwrap().to_string();

    server
        .post("/api/bookings")
        .json(&json!({
            "clientId": client_id,
            "photographerId": profile["id"],
            "service": "Basic Package",
            "date": "2026-09-12",
            "time": "10:00",
            "duration": 2,
            "location": "Studio A",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/reviews")
        .json(&json!({
            "clientId": client_id,
            "photographerId": profile["id"],
            "rating": 5,
            "comment": "Great",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .delete(&format!("/api/users/{client_id}"))
        .await
        .assert_status_ok();

    server
        .get(&format!("/api/users/{client_id}"))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);
    let bookings = server
        .get(&format!("/api/bookings/client/{client_id}"))
        .await
        .json::<Vec<Value>>();
    assert!(bookings.is_empty());
    let reviews = server
        .get(&format!("/api/reviews/client/{client_id}"))
        .await
        .json::<Vec<Value>>();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_admin_stats_and_analytics() {
    let server = test_server();
    let client = register_client(&server, "alice").await;
    let (_, profile) = register_photographer(&server, "bob").await;

    let booking = server
        .post("/api/bookings")
        .json(&json!({
            "clientId": client["id"],
            "photographerId": profile["id"],
            "service": "Basic Package",
            "date": "2026-09-12",
            "time": "10:00",
            "duration": 2,
            "location": "Studio A",
        }))
        .await
        .json::<Value>()["booking"]
        .clone();
    server
        .put(&format!(
            "/api/admin/bookings/{}/status",
            booking["id"].as_str().unwrap()
        ))
        .json(&json!({ "status": "completed" }))
        .await
        .assert_status_ok();

    let stats = server.get("/api/admin/stats").await.json::<Value>();
    assert_eq!(stats["totalUsers"], 2);
    assert_eq!(stats["totalPhotographers"], 1);
    assert_eq!(stats["totalBookings"], 1);
    assert_eq!(stats["revenue"], 100.0);
    assert_eq!(stats["statusCounts"]["completed"], 1);
    assert_eq!(stats["topPhotographers"][0]["photographerName"], "bob");

    let analytics = server
        .get("/api/admin/analytics")
        .add_query_param("period", "week")
        .await
        .json::<Value>();
    assert_eq!(analytics["period"], "week");
    assert_eq!(analytics["data"][0]["totalBookings"], 1);

    let bad = server
        .get("/api/admin/analytics")
        .add_query_param("period", "century")
        .await;
    bad.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_load_defaults_and_update() {
    let server = test_server();
    let settings = server.get("/api/admin/settings").await.json::<Value>();
    assert_eq!(settings["settings"]["siteName"], "Lumen Studio");
    assert_eq!(settings["settings"]["bookingSettings"]["minAdvanceHours"], 24);

    let updated = server
        .put("/api/admin/settings")
        .json(&json!({ "siteName": "New Name" }))
        .await
        .json::<Value>();
    assert_eq!(updated["settings"]["siteName"], "New Name");

    let reloaded = server.get("/api/admin/settings").await.json::<Value>();
    assert_eq!(reloaded["settings"]["siteName"], "New Name");
}

#[tokio::test]
async fn test_portfolio_lifecycle_by_id() {
    let server = test_server();
    let (_, profile) = register_photographer(&server, "bob").await;
    let photographer_id = profile["id"].as_str().unwrap().to_string();

    let added = server
        .post(&format!("/api/photographers/{photographer_id}/portfolio"))
        .json(&json!({
            "title": "Golden hour",
            "category": "Portrait",
        }))
        .await;
    added.assert_status(axum::http::StatusCode::CREATED);
    let portfolio = added.json::<Value>()["portfolio"].clone();
    let item_id = portfolio[0]["id"].as_str().unwrap().to_string();

    let updated = server
        .put(&format!(
            "/api/photographers/{photographer_id}/portfolio/{item_id}"
        ))
        .json(&json!({ "title": "Blue hour" }))
        .await
        .json::<Value>();
    assert_eq!(updated["portfolio"][0]["title"], "Blue hour");

    // Unknown item ids are a 404, never index panics.
    server
        .put(&format!(
            "/api/photographers/{photographer_id}/portfolio/{}",
            uuid::Uuid::new_v4()
        ))
        .json(&json!({ "title": "nope" }))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);

    server
        .delete(&format!(
            "/api/photographers/{photographer_id}/portfolio/{item_id}"
        ))
        .await
        .assert_status_ok();
    let profile = server
        .get(&format!("/api/photographers/{photographer_id}"))
        .await
        .json::<Value>();
    assert!(profile["portfolio"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_request_listing_filters_and_stats() {
    let server = test_server();
    let client = register_client(&server, "alice").await;

    let res = server
        .post("/api/photo-edit-requests")
        .multipart(
            axum_test::multipart::MultipartForm::new()
                .add_text("clientId", client["id"].as_str().unwrap())
                .add_text("title", "Color grade my shoot")
                .add_text("priority", "high"),
        )
        .await;
    res.assert_status(axum::http::StatusCode::CREATED);
    let request = res.json::<Value>()["request"].clone();
    assert_eq!(request["status"], "pending");
    assert_eq!(request["priority"], "high");

    let page = server
        .get("/api/photo-edit-requests")
        .add_query_param("status", "pending")
        .await
        .json::<Value>();
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["pagination"]["current"], 1);

    let empty = server
        .get("/api/photo-edit-requests")
        .add_query_param("status", "delivered")
        .await
        .json::<Value>();
    assert_eq!(empty["pagination"]["total"], 0);

    let invalid = server
        .get("/api/photo-edit-requests")
        .add_query_param("status", "lost")
        .await;
    invalid.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let stats = server
        .get("/api/photo-edit-requests/stats/overview")
        .await
        .json::<Value>();
    assert_eq!(stats["stats"]["total"], 1);
    assert_eq!(stats["stats"]["pending"], 1);
}
