use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{ScheduleError, ScheduleResult};

/// Increment between candidate start times when the caller does not pick one.
pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// Where and how to look for a meeting slot on a single day.
///
/// `day_start_hour` and `day_end_hour` are wall-clock hours on `date` in
/// `timezone`. They are resolved to absolute instants by [`SearchWindow::bounds`],
/// which is also where the window is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchWindow {
    pub date: NaiveDate,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub step: Duration,
    pub meeting_duration: Duration,
    pub timezone: Tz,
}

/// Absolute start and end of a search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayBounds {
    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

impl SearchWindow {
    /// A UTC window with the default step.
    pub fn new(
        date: NaiveDate,
        day_start_hour: u32,
        day_end_hour: u32,
        meeting_duration: Duration,
    ) -> Self {
        Self {
            date,
            day_start_hour,
            day_end_hour,
            step: Duration::minutes(DEFAULT_STEP_MINUTES),
            meeting_duration,
            timezone: chrono_tz::UTC,
        }
    }

    /// A window on the current date as seen from `timezone`.
    pub fn today(
        timezone: Tz,
        day_start_hour: u32,
        day_end_hour: u32,
        meeting_duration: Duration,
    ) -> Self {
        let date = Utc::now().with_timezone(&timezone).date_naive();
        Self::new(date, day_start_hour, day_end_hour, meeting_duration).with_timezone(timezone)
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Checks the hour range and durations without resolving the date.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.day_start_hour > 23 || self.day_end_hour > 23 {
            return Err(ScheduleError::InvalidSearchWindow(format!(
                "hours must be between 0 and 23 (got {}..{})",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.day_end_hour <= self.day_start_hour {
            return Err(ScheduleError::InvalidSearchWindow(format!(
                "day end hour {} must be after day start hour {}",
                self.day_end_hour, self.day_start_hour
            )));
        }
        if self.step <= Duration::zero() {
            return Err(ScheduleError::InvalidSearchWindow(
                "step duration must be positive".to_string(),
            ));
        }
        if self.meeting_duration <= Duration::zero() {
            return Err(ScheduleError::InvalidSearchWindow(
                "meeting duration must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the window and resolves it to absolute instants.
    pub fn bounds(&self) -> ScheduleResult<DayBounds> {
        self.validate()?;
        Ok(DayBounds {
            start: self.resolve_hour(self.day_start_hour)?,
            end: self.resolve_hour(self.day_end_hour)?,
        })
    }

    fn resolve_hour(&self, hour: u32) -> ScheduleResult<DateTime<Utc>> {
        let local = self.date.and_hms_opt(hour, 0, 0).ok_or_else(|| {
            ScheduleError::InvalidSearchWindow(format!("hour {hour} is out of range"))
        })?;
        // Ambiguous local times (DST fall-back) resolve to the earlier instant.
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                ScheduleError::InvalidSearchWindow(format!(
                    "{local} does not exist in {}",
                    self.timezone.name()
                ))
            })
    }
}

/// Parses an IANA timezone name such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> ScheduleResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidSearchWindow(format!("unknown timezone '{name}'")))
}
