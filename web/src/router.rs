//! Route table for the `/api` surface.

use crate::handlers::{
    admin, auth, bookings, edit_requests, photographers, reviews, testimonials, users,
};
use crate::state::AppState;
use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

#[allow(clippy::unused_async)]
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the full application router over the given state.
///
/// Uploaded files are served statically under `/uploads`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let uploads_dir = state.uploads.root().to_path_buf();

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let user_routes = Router::new()
        .route("/", get(users::list))
        .route("/:id", get(users::get).put(users::update).delete(users::delete))
        .route("/:id/upload-photo", post(users::upload_photo));

    let photographer_routes = Router::new()
        .route("/", get(photographers::list).post(photographers::create))
        .route("/featured", get(photographers::featured))
        .route("/user/:user_id", get(photographers::get_by_user))
        .route(
            "/:id",
            get(photographers::get)
                .put(photographers::update)
                .delete(photographers::delete),
        )
        .route("/:id/portfolio", post(photographers::add_portfolio_item))
        .route(
            "/:id/portfolio/:item_id",
            put(photographers::update_portfolio_item)
                .delete(photographers::remove_portfolio_item),
        )
        .route("/:id/availability", post(photographers::add_availability))
        .route(
            "/:id/availability/:entry_id",
            put(photographers::update_availability).delete(photographers::remove_availability),
        );

    let booking_routes = Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route(
            "/:id",
            get(bookings::get).put(bookings::update).delete(bookings::delete),
        )
        .route("/:id/status", put(bookings::update_status))
        .route("/client/:client_id", get(bookings::list_by_client))
        .route(
            "/photographer/:photographer_id",
            get(bookings::list_by_photographer),
        );

    let review_routes = Router::new()
        .route("/", get(reviews::list).post(reviews::create))
        .route("/:id", put(reviews::update).delete(reviews::delete))
        .route("/:id/helpful", put(reviews::add_helpful_vote))
        .route("/:id/response", post(reviews::respond))
        .route("/photographer/:id", get(reviews::list_by_photographer))
        .route("/photographer/:id/stats", get(reviews::stats))
        .route("/client/:id", get(reviews::list_by_client));

    let testimonial_routes = Router::new()
        .route("/", get(testimonials::list).post(testimonials::promote))
        .route("/featured", get(testimonials::featured))
        .route("/available-reviews", get(testimonials::available_reviews))
        .route("/photographer/:id", get(testimonials::list_by_photographer))
        .route(
            "/:id",
            put(testimonials::update).delete(testimonials::delete),
        )
        .route("/:id/toggle-featured", put(testimonials::toggle_featured))
        .route("/:id/toggle-active", put(testimonials::toggle_active));

    let edit_request_routes = Router::new()
        .route("/", get(edit_requests::list).post(edit_requests::create))
        .route("/stats/overview", get(edit_requests::stats))
        .route("/client/:id", get(edit_requests::list_by_client))
        .route("/photographer/:id", get(edit_requests::list_by_photographer))
        .route("/:id", get(edit_requests::get).delete(edit_requests::delete))
        .route("/:id/assign", put(edit_requests::assign))
        .route("/:id/status", put(edit_requests::update_status))
        .route("/:id/edited-photos", post(edit_requests::add_edited_photos))
        .route("/:id/payment", put(edit_requests::update_payment));

    let admin_routes = Router::new()
        .route("/stats", get(admin::dashboard_stats))
        .route("/analytics", get(admin::analytics))
        .route("/users", get(admin::list_users))
        .route(
            "/users/:id",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route("/photographers", get(admin::list_photographers))
        .route("/photographers/:id", delete(admin::delete_photographer))
        .route("/photographers/:id/featured", put(admin::set_featured))
        .route("/bookings", get(admin::list_bookings))
        .route("/bookings/:id", delete(admin::delete_booking))
        .route("/bookings/:id/status", put(admin::update_booking_status))
        .route(
            "/settings",
            get(admin::get_settings).put(admin::update_settings),
        );

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/photographers", photographer_routes)
        .nest("/bookings", booking_routes)
        .nest("/reviews", review_routes)
        .nest("/testimonials", testimonial_routes)
        .nest("/photo-edit-requests", edit_request_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(state)
}
