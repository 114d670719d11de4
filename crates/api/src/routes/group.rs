use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/groups/:group_id/available-slot",
            post(handlers::group::find_available_slot),
        )
        .route(
            "/api/groups/:group_id/free-slots",
            post(handlers::group::find_free_slots),
        )
        .route(
            "/api/groups/:group_id/busy",
            get(handlers::group::get_busy_timelines),
        )
}
