use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, set_security_headers};
use crate::events::booking_events_ws;
use crate::handlers::{self, bookings, spaces, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/spaces", get(spaces::list_spaces).post(spaces::create_space))
        .route(
            "/spaces/:id",
            get(spaces::get_space)
                .put(spaces::update_space)
                .delete(spaces::delete_space),
        )
        .route("/spaces/:id/quote", get(spaces::quote_space))
        .route("/spaces/:id/bookings", post(bookings::create_booking))
        .route("/provider/spaces", get(spaces::my_spaces))
        .route("/bookings", get(bookings::list_bookings))
        .route("/profile", get(users::get_profile).put(users::upsert_profile))
        .route("/ws/bookings", get(booking_events_ws))
        .layer(middleware::from_fn(set_security_headers))
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
