pub mod catalog;
pub mod date_math;
pub mod deadline_engine;
pub mod federal_holidays;
pub mod holidays;

pub use catalog::RuleCatalog;
pub use deadline_engine::{compute_deadlines, parse_base_date, uncovered_years, DeadlineEngine};
pub use holidays::HolidayRegistry;
