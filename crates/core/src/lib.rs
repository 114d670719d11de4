//! # CommonSlot Core
//!
//! Finds times when every member of a group is free.
//!
//! The pipeline has three stages:
//!
//! - [`collector`]: member ids → busy intervals, via an [`sources::EventSource`]
//! - [`merge`]: busy intervals → a sorted, coalesced [`merge::MergedBusyTimeline`]
//! - [`slots`]: timeline + [`models::SearchWindow`] → first free slot or all gaps
//!
//! [`engine::SchedulingEngine`] runs them in order. The merge and slot stages
//! are plain functions and can be called on their own.

pub mod collector;
pub mod engine;
pub mod errors;
pub mod merge;
pub mod models;
pub mod slots;
pub mod sources;

pub use engine::SchedulingEngine;
pub use errors::{ScheduleError, ScheduleResult};
pub use merge::MergedBusyTimeline;
