pub mod compliance;

pub mod config;

pub mod schedule;

pub mod telemetry;

pub use compliance::{DeadlineEngine, HolidayRegistry, RuleCatalog};
