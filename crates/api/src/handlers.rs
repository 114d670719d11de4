/// Slot search and busy timelines for stored groups
pub mod group;
/// Slot search over an explicit list of members
pub mod availability;
