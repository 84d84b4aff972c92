use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{cancel_booking, show_booking};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id/cancel", put(cancel_booking));

    Router::new().nest("/bookings", bookings_routers)
}
