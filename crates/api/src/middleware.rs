/// Mapping from `ScheduleError` to HTTP responses
pub mod error_handling;
