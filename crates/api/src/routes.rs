pub mod availability;
pub mod group;
pub mod health;
