//! # Availability Handlers
//!
//! The same search as the group endpoints, for callers that already know
//! which members they want to meet with.

use axum::{Json, extract::State};
use commonslot_core::{
    errors::ScheduleError,
    models::{
        FreeSlot,
        availability::{FindSlotRequest, FreeSlotsResponse},
    },
};
use std::sync::Arc;

use crate::{ApiState, handlers::group::NO_SLOT_MESSAGE, middleware::error_handling::AppError};

/// ```text
/// POST /api/availability/slot
/// ```
#[axum::debug_handler]
pub async fn find_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<FindSlotRequest>,
) -> Result<Json<FreeSlot>, AppError> {
    let members = payload.require_members()?;
    let window = payload.search_window(state.default_step_minutes)?;
    let range = payload.range()?;

    let slot = state
        .engine
        .find_first_common_slot(members, range, &window)
        .await?
        .ok_or_else(|| ScheduleError::NotFound(NO_SLOT_MESSAGE.to_string()))?;

    Ok(Json(slot))
}

/// ```text
/// POST /api/availability/gaps
/// ```
#[axum::debug_handler]
pub async fn find_gaps(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<FindSlotRequest>,
) -> Result<Json<FreeSlotsResponse>, AppError> {
    let members = payload.require_members()?;
    let window = payload.search_window(state.default_step_minutes)?;
    let range = payload.range()?;

    let slots = state.engine.find_all_gaps(members, range, &window).await?;

    Ok(Json(FreeSlotsResponse { slots }))
}
