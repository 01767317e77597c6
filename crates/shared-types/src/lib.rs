pub mod error;

// Deadline domain types
pub mod calendar;
pub mod config;
pub mod deadline;
pub mod holiday;
pub mod rule;
pub mod todo;

pub use error::*;

pub use calendar::*;
pub use config::*;
pub use deadline::*;
pub use holiday::*;
pub use rule::*;
pub use todo::*;
