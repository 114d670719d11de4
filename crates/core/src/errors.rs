use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::models::MemberId;

/// A single member whose schedule could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFailure {
    pub member_id: MemberId,
    pub reason: String,
}

impl fmt::Display for MemberFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.member_id, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid search window: {0}")]
    InvalidSearchWindow(String),

    #[error("Failed to collect schedules for members: {}", format_failures(.0))]
    CollectionFailure(Vec<MemberFailure>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    /// Member ids named by a `CollectionFailure`, empty for every other variant.
    pub fn failed_members(&self) -> Vec<&str> {
        match self {
            ScheduleError::CollectionFailure(failures) => {
                failures.iter().map(|f| f.member_id.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn format_failures(failures: &[MemberFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
