use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::location::{
    check_in, check_out, close_location, register_location, reopen_location, set_occupancy,
    show_available_locations, show_full_locations, show_location, show_location_list,
    show_location_statistics, update_location,
};

pub fn build_location_routers() -> Router<AppRegistry> {
    let locations_routers = Router::new()
        .route("/", post(register_location))
        .route("/", get(show_location_list))
        .route("/available", get(show_available_locations))
        .route("/full", get(show_full_locations))
        .route("/statistics", get(show_location_statistics))
        .route("/:location_id", get(show_location))
        .route("/:location_id", put(update_location))
        .route("/:location_id/check-in", put(check_in))
        .route("/:location_id/check-out", put(check_out))
        .route("/:location_id/occupancy", put(set_occupancy))
        .route("/:location_id/close", put(close_location))
        .route("/:location_id/reopen", put(reopen_location));

    Router::new().nest("/locations", locations_routers)
}
