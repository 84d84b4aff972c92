use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{book_slot, show_slot_bookings};
use crate::handler::slot::{
    close_slot, create_default_slots, register_slot, reopen_slot, show_available_slots,
    show_slot, show_slot_list, show_slot_statistics, show_today_slots, show_upcoming_slots,
};

pub fn build_slot_routers() -> Router<AppRegistry> {
    let slots_routers = Router::new()
        .route("/", post(register_slot))
        .route("/", get(show_slot_list))
        .route("/defaults", post(create_default_slots))
        .route("/available", get(show_available_slots))
        .route("/today", get(show_today_slots))
        .route("/upcoming", get(show_upcoming_slots))
        .route("/statistics", get(show_slot_statistics))
        .route("/:slot_id", get(show_slot))
        .route("/:slot_id/close", put(close_slot))
        .route("/:slot_id/reopen", put(reopen_slot))
        .route("/:slot_id/bookings", post(book_slot))
        .route("/:slot_id/bookings", get(show_slot_bookings));

    Router::new().nest("/slots", slots_routers)
}
