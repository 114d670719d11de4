use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/availability/slot", post(handlers::availability::find_slot))
        .route("/api/availability/gaps", post(handlers::availability::find_gaps))
}
