//! # Group Handlers
//!
//! Find a common meeting time for everyone in a stored group. Members come
//! from the group record; the request body only describes the search window.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use commonslot_core::{
    errors::ScheduleError,
    models::{
        FreeSlot, MemberId,
        availability::{BusyQuery, FindSlotRequest, FreeSlotsResponse, GroupAvailability},
    },
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub const NO_SLOT_MESSAGE: &str = "No available time slot found for all members";

/// First slot in the requested window where every group member is free.
///
/// # Endpoint
///
/// ```text
/// POST /api/groups/:group_id/available-slot
/// ```
///
/// # Errors
///
/// * `ScheduleError::NotFound` - Unknown group, or no slot fits the window
/// * `ScheduleError::Validation` - The group has no members
/// * `ScheduleError::InvalidSearchWindow` - Bad hours, step, duration or timezone
/// * `ScheduleError::CollectionFailure` - A member's calendar could not be read
#[axum::debug_handler]
pub async fn find_available_slot(
    State(state): State<Arc<ApiState>>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<FindSlotRequest>,
) -> Result<Json<FreeSlot>, AppError> {
    let window = payload.search_window(state.default_step_minutes)?;
    let range = payload.range()?;
    let members = resolve_members(&state, group_id).await?;

    let slot = state
        .engine
        .find_first_common_slot(&members, range, &window)
        .await?
        .ok_or_else(|| ScheduleError::NotFound(NO_SLOT_MESSAGE.to_string()))?;

    Ok(Json(slot))
}

/// Every gap in the requested window long enough for the meeting.
///
/// ```text
/// POST /api/groups/:group_id/free-slots
/// ```
#[axum::debug_handler]
pub async fn find_free_slots(
    State(state): State<Arc<ApiState>>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<FindSlotRequest>,
) -> Result<Json<FreeSlotsResponse>, AppError> {
    let window = payload.search_window(state.default_step_minutes)?;
    let range = payload.range()?;
    let members = resolve_members(&state, group_id).await?;

    let slots = state.engine.find_all_gaps(&members, range, &window).await?;

    Ok(Json(FreeSlotsResponse { slots }))
}

/// Merged busy time per member and for the group as a whole.
///
/// ```text
/// GET /api/groups/:group_id/busy?from=...&to=...
/// ```
#[axum::debug_handler]
pub async fn get_busy_timelines(
    State(state): State<Arc<ApiState>>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<BusyQuery>,
) -> Result<Json<GroupAvailability>, AppError> {
    let range = query.range()?;
    let members = resolve_members(&state, group_id).await?;

    let availability = state.engine.busy_timelines(&members, range).await?;

    Ok(Json(availability))
}

async fn resolve_members(state: &ApiState, group_id: Uuid) -> Result<Vec<MemberId>, AppError> {
    let members = state
        .directory
        .group_members(group_id)
        .await?
        .ok_or_else(|| ScheduleError::NotFound(format!("Group with ID {} not found", group_id)))?;

    if members.is_empty() {
        return Err(ScheduleError::Validation(format!("Group {} has no members", group_id)).into());
    }

    debug!(%group_id, members = members.len(), "resolved group members");
    Ok(members)
}
