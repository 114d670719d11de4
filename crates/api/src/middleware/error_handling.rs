//! # Error Handling Middleware
//!
//! Maps `ScheduleError` onto HTTP status codes and a JSON body of the form
//! `{ "error": message }`, so every handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use commonslot_core::errors::ScheduleError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use commonslot_api::middleware::error_handling::AppError;
/// use commonslot_core::{errors::ScheduleError, models::FreeSlot};
///
/// async fn handler(slot: Option<FreeSlot>) -> Result<Json<FreeSlot>, AppError> {
///     let slot = slot.ok_or_else(|| ScheduleError::NotFound("No slot".to_string()))?;
///     Ok(Json(slot))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScheduleError::InvalidInterval { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ScheduleError::InvalidSearchWindow(_) => StatusCode::BAD_REQUEST,
            ScheduleError::CollectionFailure(_) => StatusCode::BAD_GATEWAY,
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScheduleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Allows `?` on `ScheduleResult` inside handlers.
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

/// Store and directory failures surface as `ScheduleError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Database(err))
    }
}

/// Maps a ScheduleError straight to an HTTP response.
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}
