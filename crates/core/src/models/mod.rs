pub mod availability;
pub mod interval;
pub mod schedule;
pub mod slot;
pub mod window;

pub use interval::{BusyEvent, Interval};
pub use schedule::{DateRange, MemberId, MemberSchedule};
pub use slot::FreeSlot;
pub use window::{DayBounds, SearchWindow};
