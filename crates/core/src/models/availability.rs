use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{
    interval::Interval,
    schedule::{DateRange, MemberId},
    slot::FreeSlot,
    window::{SearchWindow, parse_timezone},
};

/// Body of the slot-finding endpoints.
///
/// `member_ids` is only read by the ad-hoc endpoints; group endpoints take
/// their members from the group itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindSlotRequest {
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
    pub date: Option<NaiveDate>,
    pub start_hour: u32,
    pub end_hour: u32,
    pub meeting_minutes: i64,
    pub step_minutes: Option<i64>,
    pub timezone: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl FindSlotRequest {
    /// Builds and validates the search window, falling back to
    /// `default_step_minutes` and to today's date in the requested timezone.
    pub fn search_window(&self, default_step_minutes: i64) -> ScheduleResult<SearchWindow> {
        let timezone = match &self.timezone {
            Some(name) => parse_timezone(name)?,
            None => chrono_tz::UTC,
        };
        let meeting_duration = minutes("meeting_minutes", self.meeting_minutes)?;
        let window = match self.date {
            Some(date) => SearchWindow::new(date, self.start_hour, self.end_hour, meeting_duration)
                .with_timezone(timezone),
            None => SearchWindow::today(timezone, self.start_hour, self.end_hour, meeting_duration),
        };
        let step = minutes("step_minutes", self.step_minutes.unwrap_or(default_step_minutes))?;
        let window = window.with_step(step);
        window.bounds()?;
        Ok(window)
    }

    pub fn range(&self) -> ScheduleResult<Option<DateRange>> {
        DateRange::from_bounds(self.from, self.to)
    }

    /// Member ids for the ad-hoc endpoints, rejecting an empty list.
    pub fn require_members(&self) -> ScheduleResult<&[MemberId]> {
        if self.member_ids.is_empty() {
            return Err(ScheduleError::Validation(
                "At least one member id must be provided".to_string(),
            ));
        }
        Ok(&self.member_ids)
    }
}

fn minutes(field: &str, value: i64) -> ScheduleResult<Duration> {
    Duration::try_minutes(value).ok_or_else(|| {
        ScheduleError::InvalidSearchWindow(format!("{field} {value} is out of range"))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlotsResponse {
    pub slots: Vec<FreeSlot>,
}

/// Optional range filter for the busy-timeline endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusyQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl BusyQuery {
    pub fn range(&self) -> ScheduleResult<Option<DateRange>> {
        DateRange::from_bounds(self.from, self.to)
    }
}

/// Merged busy time for each member plus the union across all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAvailability {
    pub members: BTreeMap<MemberId, Vec<Interval>>,
    pub combined: Vec<Interval>,
}
