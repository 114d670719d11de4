use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::interval::Interval;

/// Opaque user identifier as issued by the account service.
pub type MemberId = String;

/// One member's busy time for a single scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSchedule {
    pub member_id: MemberId,
    pub busy: Vec<Interval>,
}

impl MemberSchedule {
    pub fn new(member_id: impl Into<MemberId>, busy: Vec<Interval>) -> Self {
        Self {
            member_id: member_id.into(),
            busy,
        }
    }
}

/// Temporal filter handed to the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> ScheduleResult<Self> {
        if to <= from {
            return Err(ScheduleError::Validation(format!(
                "Date range must end after it starts (from {from}, to {to})"
            )));
        }
        Ok(Self { from, to })
    }

    /// Builds a range from optional bounds. Both or neither must be present.
    pub fn from_bounds(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ScheduleResult<Option<Self>> {
        match (from, to) {
            (Some(from), Some(to)) => Self::new(from, to).map(Some),
            (None, None) => Ok(None),
            _ => Err(ScheduleError::Validation(
                "Both 'from' and 'to' must be provided to filter by date range".to_string(),
            )),
        }
    }

    pub fn overlaps(&self, interval: &Interval) -> bool {
        interval.start() < self.to && interval.end() > self.from
    }
}
